use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::finding::{Category, Diagnostic};

/// Placeholder in tool arguments replaced by the materialized source path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Why an external tool produced no usable output.
/// Never leaves the backend layer: callers see an empty result instead.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to the tool: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },

    #[error("unparsable output: {0}")]
    Parse(String),
}

/// A fully resolved external command with its hard deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str], timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    /// Arguments with `{file}` substituted; left as-is when there is no file.
    pub fn resolved_args(&self, file: Option<&Path>) -> Vec<String> {
        match file {
            Some(path) => {
                let path = path.to_string_lossy();
                self.args
                    .iter()
                    .map(|a| a.replace(FILE_PLACEHOLDER, &path))
                    .collect()
            }
            None => self.args.clone(),
        }
    }
}

/// Normalizes one external tool's output into diagnostics.
/// All loosely-typed handling of foreign output stays inside implementors.
pub trait ToolAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn category(&self) -> Category;

    fn command(&self) -> &ToolCommand;

    fn parse(&self, stdout: &str) -> Result<Vec<Diagnostic>, BackendError>;
}

/// Run a command to completion under its deadline and return its stdout.
/// The child is killed if the deadline expires.
pub async fn capture(
    command: &ToolCommand,
    file: Option<&Path>,
    stdin: Option<&[u8]>,
) -> Result<String, BackendError> {
    let mut child = Command::new(&command.program)
        .args(command.resolved_args(file))
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| BackendError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    let run = async move {
        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            // A tool that exits without reading its input is not an error.
            match pipe.write_all(input).await {
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                result => result?,
            }
            drop(pipe);
        }
        child.wait_with_output().await
    };

    let output = tokio::time::timeout(command.timeout, run)
        .await
        .map_err(|_| BackendError::Timeout(command.timeout))??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BackendError::ExitStatus {
            status: output.status,
            stderr: stderr.trim().chars().take(500).collect(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run an adapter's tool against `file`. Any failure is logged and yields an
/// empty list, indistinguishable from a clean run.
pub async fn run_tool(adapter: &dyn ToolAdapter, file: &Path) -> Vec<Diagnostic> {
    let started = Instant::now();
    let result = match capture(adapter.command(), Some(file), None).await {
        Ok(stdout) => adapter.parse(&stdout),
        Err(e) => Err(e),
    };
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(diagnostics) => {
            debug!(
                tool = adapter.name(),
                category = %adapter.category(),
                count = diagnostics.len(),
                elapsed_ms,
                "external backend finished"
            );
            diagnostics
        }
        Err(error) => {
            warn!(
                tool = adapter.name(),
                category = %adapter.category(),
                elapsed_ms,
                %error,
                "external backend unavailable; treating as empty"
            );
            Vec::new()
        }
    }
}

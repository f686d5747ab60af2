use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::backend::{capture, ToolCommand};
use crate::finding::Diagnostic;

/// Characters of source sent to the summarizer.
pub const SUMMARY_EXCERPT_CHARS: usize = 2000;

/// Leading `SUMMARY_EXCERPT_CHARS` characters of the source
pub fn excerpt(source: &str) -> &str {
    match source.char_indices().nth(SUMMARY_EXCERPT_CHARS) {
        Some((idx, _)) => &source[..idx],
        None => source,
    }
}

/// Produces an optional narrative summary of an analysis.
/// `None` is a normal outcome (unavailable, failed, nothing to say).
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        excerpt: &str,
        security: &[Diagnostic],
        style: &[Diagnostic],
    ) -> Option<String>;
}

#[derive(Serialize)]
struct SummaryRequest<'a> {
    source_excerpt: &'a str,
    security: &'a [Diagnostic],
    style: &'a [Diagnostic],
}

/// Pipes a JSON request to an external command and reads the summary from
/// its stdout.
pub struct CommandSummarizer {
    command: ToolCommand,
}

impl CommandSummarizer {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl Summarizer for CommandSummarizer {
    async fn summarize(
        &self,
        excerpt: &str,
        security: &[Diagnostic],
        style: &[Diagnostic],
    ) -> Option<String> {
        let request = SummaryRequest {
            source_excerpt: excerpt,
            security,
            style,
        };
        let payload = match serde_json::to_vec(&request) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "could not encode summary request");
                return None;
            }
        };
        match capture(&self.command, None, Some(&payload)).await {
            Ok(stdout) => {
                let summary = stdout.trim();
                (!summary.is_empty()).then(|| summary.to_string())
            }
            Err(error) => {
                warn!(summarizer = %self.command.program, %error, "summary unavailable");
                None
            }
        }
    }
}

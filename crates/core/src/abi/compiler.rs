use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::types::AbiEntry;
use crate::backend::{capture, BackendError, ToolCommand};

/// A `solc`-compatible compiler invoked with `--combined-json abi`.
pub struct CompilerToolchain {
    command: ToolCommand,
}

impl CompilerToolchain {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Compile `file` as a single unit and return the interface of the first
    /// contract found, trying `preferred` names (source order) first.
    pub async fn interface(
        &self,
        file: &Path,
        preferred: &[String],
    ) -> Result<Vec<AbiEntry>, BackendError> {
        let stdout = capture(&self.command, Some(file), None).await?;
        parse_combined_json(&stdout, preferred)
    }
}

/// Pick one contract out of `--combined-json abi` output.
///
/// Keys look like `<path>:<ContractName>`; the ABI is an array or, on older
/// compilers, a JSON-encoded string. Constructor, fallback, receive and error
/// entries are dropped.
pub fn parse_combined_json(
    stdout: &str,
    preferred: &[String],
) -> Result<Vec<AbiEntry>, BackendError> {
    if stdout.trim().is_empty() {
        return Err(BackendError::Parse("compiler produced no output".to_string()));
    }
    let output: Value =
        serde_json::from_str(stdout.trim()).map_err(|e| BackendError::Parse(e.to_string()))?;
    let contracts = output
        .get("contracts")
        .and_then(Value::as_object)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| BackendError::Parse("no contracts in compiler output".to_string()))?;

    let chosen = preferred
        .iter()
        .find_map(|name| {
            contracts
                .iter()
                .find(|(key, _)| key.rsplit(':').next() == Some(name.as_str()))
        })
        .or_else(|| contracts.iter().next())
        .map(|(_, contract)| contract)
        .ok_or_else(|| BackendError::Parse("no contracts in compiler output".to_string()))?;

    let abi: Value = match chosen.get("abi") {
        Some(Value::String(encoded)) => {
            serde_json::from_str(encoded).map_err(|e| BackendError::Parse(e.to_string()))?
        }
        Some(abi @ Value::Array(_)) => abi.clone(),
        _ => return Err(BackendError::Parse("contract has no abi".to_string())),
    };

    let entries = abi
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter(|item| {
                    matches!(
                        item.get("type").and_then(Value::as_str),
                        Some("function") | Some("event")
                    )
                })
                .filter_map(|item| match serde_json::from_value(item.clone()) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        debug!(error = %e, "skipping ABI entry the model cannot represent");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(entries)
}

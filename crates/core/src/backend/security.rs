use serde_json::Value;

use super::runner::{BackendError, ToolAdapter, ToolCommand};
use crate::finding::*;

/// Adapter for a Slither-style static analyzer emitting one JSON document:
/// `{"success": true, "results": {"detectors": [...]}}`.
pub struct SecurityToolAdapter {
    command: ToolCommand,
}

impl SecurityToolAdapter {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }
}

impl ToolAdapter for SecurityToolAdapter {
    fn name(&self) -> &str {
        &self.command.program
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn command(&self) -> &ToolCommand {
        &self.command
    }

    fn parse(&self, stdout: &str) -> Result<Vec<Diagnostic>, BackendError> {
        parse_security_report(stdout)
    }
}

pub fn parse_security_report(stdout: &str) -> Result<Vec<Diagnostic>, BackendError> {
    let report: Value =
        serde_json::from_str(stdout.trim()).map_err(|e| BackendError::Parse(e.to_string()))?;

    if report.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = report
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("tool reported failure");
        return Err(BackendError::Parse(reason.to_string()));
    }

    // A clean run omits the detectors array entirely.
    let Some(detectors) = report.pointer("/results/detectors") else {
        return Ok(Vec::new());
    };
    let detectors = detectors
        .as_array()
        .ok_or_else(|| BackendError::Parse("results.detectors is not an array".to_string()))?;

    Ok(detectors.iter().filter_map(normalize_detector).collect())
}

fn normalize_detector(entry: &Value) -> Option<Diagnostic> {
    let rule = entry.get("check")?.as_str()?;
    let severity = entry
        .get("impact")
        .and_then(Value::as_str)
        .map_or(Severity::Unknown, Severity::from_impact);
    let confidence = entry
        .get("confidence")
        .and_then(Value::as_str)
        .and_then(Confidence::from_label);
    let message = entry
        .get("description")
        .and_then(Value::as_str)
        .map_or_else(|| rule.to_string(), |d| d.trim().to_string());

    let elements = entry
        .get("elements")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let line = elements
        .first()
        .and_then(|e| e.pointer("/source_mapping/lines/0"))
        .and_then(Value::as_u64)
        .map_or(1, |l| l as usize);

    let function = elements
        .iter()
        .find(|e| e.get("type").and_then(Value::as_str) == Some("function"))
        .and_then(|e| e.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(NO_FUNCTION);

    Some(Diagnostic {
        source: DiagnosticSource::SecurityTool,
        rule: rule.to_string(),
        message,
        severity,
        confidence,
        location: SourceLocation::line(line),
        function: function.to_string(),
        recommendation: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{"success": true, "error": null, "results": {"detectors": [
        {"check": "reentrancy-eth", "impact": "High", "confidence": "Medium",
         "description": "Reentrancy in Vault.withdraw()\n",
         "elements": [
            {"type": "function", "name": "withdraw", "source_mapping": {"lines": [21, 22, 23]}}
         ]},
        {"check": "solc-version", "impact": "Informational", "confidence": "High",
         "description": "Pragma version too recent", "elements": []},
        {"check": "costly-loop", "impact": "Optimization", "confidence": "Medium",
         "description": "Loop", "elements": [{"type": "node", "name": "x", "source_mapping": {"lines": [40]}}]},
        {"impact": "High"}
    ]}}"#;

    #[test]
    fn test_normalizes_detectors() {
        let diagnostics = parse_security_report(REPORT).unwrap();
        assert_eq!(diagnostics.len(), 3);

        let first = &diagnostics[0];
        assert_eq!(first.rule, "reentrancy-eth");
        assert_eq!(first.severity, Severity::High);
        assert_eq!(first.confidence, Some(Confidence::Medium));
        assert_eq!(first.function, "withdraw");
        assert_eq!(first.location.line, 21);
        assert_eq!(first.message, "Reentrancy in Vault.withdraw()");
        assert_eq!(first.source, DiagnosticSource::SecurityTool);

        assert_eq!(diagnostics[1].function, NO_FUNCTION);
        assert_eq!(diagnostics[1].location.line, 1);
        assert_eq!(diagnostics[2].severity, Severity::Unknown);
    }

    #[test]
    fn test_clean_run_is_empty() {
        let diagnostics = parse_security_report(r#"{"success": true, "results": {}}"#).unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_failure_and_garbage_are_errors() {
        assert!(parse_security_report(r#"{"success": false, "error": "solc missing"}"#).is_err());
        assert!(parse_security_report("Traceback (most recent call last)").is_err());
        assert!(parse_security_report("").is_err());
    }
}

use serde_json::Value;

use super::runner::{BackendError, ToolAdapter, ToolCommand};
use crate::finding::*;

/// Adapter for a Solhint-style linter with a JSON formatter. Accepts both the
/// ESLint shape (`[{"filePath", "messages": [...]}]`) and a flat array of
/// message objects.
pub struct LintToolAdapter {
    command: ToolCommand,
}

impl LintToolAdapter {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }
}

impl ToolAdapter for LintToolAdapter {
    fn name(&self) -> &str {
        &self.command.program
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn command(&self) -> &ToolCommand {
        &self.command
    }

    fn parse(&self, stdout: &str) -> Result<Vec<Diagnostic>, BackendError> {
        parse_lint_report(stdout)
    }
}

pub fn parse_lint_report(stdout: &str) -> Result<Vec<Diagnostic>, BackendError> {
    let report: Value =
        serde_json::from_str(stdout.trim()).map_err(|e| BackendError::Parse(e.to_string()))?;
    let files = report
        .as_array()
        .ok_or_else(|| BackendError::Parse("expected an array of file results".to_string()))?;

    let mut diagnostics = Vec::new();
    for file in files {
        match file.get("messages").and_then(Value::as_array) {
            Some(messages) => diagnostics.extend(messages.iter().filter_map(normalize_message)),
            None => diagnostics.extend(normalize_message(file)),
        }
    }
    Ok(diagnostics)
}

fn normalize_message(message: &Value) -> Option<Diagnostic> {
    // Entries without a rule id (summary/conclusion objects) are not issues.
    let rule = message.get("ruleId")?.as_str()?;
    let severity = match message.get("severity") {
        Some(Value::String(label)) => Severity::from_lint_label(label),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(2) => Severity::Error,
            Some(1) => Severity::Warning,
            _ => Severity::Unknown,
        },
        _ => Severity::Unknown,
    };
    let line = message
        .get("line")
        .and_then(Value::as_u64)
        .map_or(1, |l| l as usize);
    let column = message
        .get("column")
        .and_then(Value::as_u64)
        .map(|c| c as usize);
    let text = message
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(rule);

    Some(Diagnostic {
        source: DiagnosticSource::LintTool,
        rule: rule.to_string(),
        message: text.to_string(),
        severity,
        confidence: None,
        location: SourceLocation { line, column },
        function: NO_FUNCTION.to_string(),
        recommendation: None,
    })
}

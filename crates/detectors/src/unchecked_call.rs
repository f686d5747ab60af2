use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

/// Flags low-level calls when the source shows no sign of checking their
/// return value (`require(` or a `success` flag).
pub struct UncheckedCall;

impl Detector for UncheckedCall {
    fn name(&self) -> &str {
        "unchecked-call"
    }

    fn description(&self) -> &str {
        "Detects low-level calls whose return value is never checked"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn confidence(&self) -> Option<Confidence> {
        Some(Confidence::Medium)
    }

    fn recommendation(&self) -> Option<&str> {
        Some("Capture the boolean result of the call and revert when it is false.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ctx.mentions(".call") || ctx.mentions("require(") || ctx.mentions("success") {
            return Vec::new();
        }
        vec![self.diagnostic(
            "Low-level call result is not checked; a failed call is silently ignored".to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> Vec<Diagnostic> {
        UncheckedCall.detect(&AnalysisContext::new(source))
    }

    #[test]
    fn test_detects_unchecked_call() {
        let findings = analyze("function pay(address a) external { a.call(\"\"); }");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn test_require_counts_as_check() {
        let source = r#"
            (bool ok, ) = a.call("");
            require(ok, "failed");
        "#;
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn test_success_flag_counts_as_check() {
        let source = r#"
            (bool success, ) = a.call("");
            if (!success) revert();
        "#;
        assert!(analyze(source).is_empty());
    }
}

use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

/// Flags low-level `.call` usage in a source that never mentions a
/// reentrancy guard.
pub struct ReentrancyPattern;

impl Detector for ReentrancyPattern {
    fn name(&self) -> &str {
        "reentrancy-pattern"
    }

    fn description(&self) -> &str {
        "Detects external calls in contracts without a reentrancy guard"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn confidence(&self) -> Option<Confidence> {
        Some(Confidence::Medium)
    }

    fn recommendation(&self) -> Option<&str> {
        Some("Apply a nonReentrant guard and update state before making external calls.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ctx.mentions(".call") || ctx.mentions("nonreentrant") {
            return Vec::new();
        }
        vec![self.diagnostic(
            "External call made without a reentrancy guard; a callee can re-enter before state is updated"
                .to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

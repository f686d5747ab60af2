use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

/// Flags `selfdestruct` and its legacy spelling `suicide(`.
pub struct Selfdestruct;

impl Detector for Selfdestruct {
    fn name(&self) -> &str {
        "selfdestruct"
    }

    fn description(&self) -> &str {
        "Detects contracts that can destroy themselves"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn confidence(&self) -> Option<Confidence> {
        Some(Confidence::High)
    }

    fn recommendation(&self) -> Option<&str> {
        Some("Remove the self-destruct path or restrict it behind governance.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ctx.mentions("selfdestruct") && !ctx.mentions("suicide(") {
            return Vec::new();
        }
        vec![self.diagnostic(
            "Contract can be destroyed, removing its code and forwarding its balance".to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

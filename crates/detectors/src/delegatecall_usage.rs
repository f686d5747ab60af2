use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

pub struct DelegatecallUsage;

impl Detector for DelegatecallUsage {
    fn name(&self) -> &str {
        "delegatecall-usage"
    }

    fn description(&self) -> &str {
        "Detects delegatecall, which runs foreign code against this contract's storage"
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
        Some("Only delegatecall into trusted, immutable targets.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ctx.mentions("delegatecall") {
            return Vec::new();
        }
        vec![self.diagnostic(
            "delegatecall lets the callee modify this contract's storage".to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

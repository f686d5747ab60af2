use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

pub struct TimestampDependence;

impl Detector for TimestampDependence {
    fn name(&self) -> &str {
        "timestamp-dependence"
    }

    fn description(&self) -> &str {
        "Detects logic that depends on block.timestamp"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn confidence(&self) -> Option<Confidence> {
        Some(Confidence::Medium)
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ctx.mentions("block.timestamp") {
            return Vec::new();
        }
        vec![self.diagnostic(
            "block.timestamp can be nudged by block producers".to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_timestamp() {
        let ctx = AnalysisContext::new("if (block.timestamp > deadline) revert();");
        let findings = TimestampDependence.detect(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0].recommendation.is_none());
    }

    #[test]
    fn test_block_number_ignored() {
        let ctx = AnalysisContext::new("if (block.number > start) revert();");
        assert!(TimestampDependence.detect(&ctx).is_empty());
    }
}

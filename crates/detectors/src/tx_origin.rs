use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

pub struct TxOrigin;

impl Detector for TxOrigin {
    fn name(&self) -> &str {
        "tx-origin"
    }

    fn description(&self) -> &str {
        "Detects tx.origin, which is unsafe for authorization"
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
        Some("Authorize against msg.sender instead of tx.origin.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ctx.mentions("tx.origin") {
            return Vec::new();
        }
        vec![self.diagnostic(
            "tx.origin used; a malicious intermediate contract can act on the caller's behalf"
                .to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_tx_origin() {
        let ctx = AnalysisContext::new("require(tx.origin == owner);");
        let findings = TxOrigin.detect(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "tx-origin");
    }

    #[test]
    fn test_msg_sender_ok() {
        let ctx = AnalysisContext::new("require(msg.sender == owner);");
        assert!(TxOrigin.detect(&ctx).is_empty());
    }
}

use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

/// One diagnostic per run of two or more blank lines, reported at the line
/// where the run starts.
pub struct ConsecutiveBlankLines;

impl Detector for ConsecutiveBlankLines {
    fn name(&self) -> &str {
        "consecutive-blank-lines"
    }

    fn description(&self) -> &str {
        "Flags runs of two or more blank lines"
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn confidence(&self) -> Option<Confidence> {
        None
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut findings = Vec::new();
        let mut run_start = None;
        let mut run_len = 0usize;

        // Trailing sentinel closes a run that reaches end of file.
        for (idx, line) in ctx.lines().iter().map(|l| Some(*l)).chain([None]).enumerate() {
            if line.is_some_and(|l| l.trim().is_empty()) {
                if run_start.is_none() {
                    run_start = Some(idx + 1);
                }
                run_len += 1;
                continue;
            }
            if let Some(start) = run_start.take() {
                if run_len >= 2 {
                    findings.push(self.diagnostic(
                        format!("{} consecutive blank lines", run_len),
                        start,
                        NO_FUNCTION,
                    ));
                }
            }
            run_len = 0;
        }

        findings
    }
}

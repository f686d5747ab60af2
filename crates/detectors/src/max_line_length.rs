use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

pub const MAX_LINE_LENGTH: usize = 120;

/// One diagnostic per line longer than [`MAX_LINE_LENGTH`] characters.
pub struct MaxLineLength;

impl Detector for MaxLineLength {
    fn name(&self) -> &str {
        "max-line-length"
    }

    fn description(&self) -> &str {
        "Flags lines longer than 120 characters"
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
        ctx.lines()
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                let length = line.chars().count();
                (length > MAX_LINE_LENGTH).then(|| {
                    self.diagnostic(
                        format!("Line length {} exceeds {}", length, MAX_LINE_LENGTH),
                        idx + 1,
                        NO_FUNCTION,
                    )
                })
            })
            .collect()
    }
}

use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

pub struct TrailingWhitespace;

impl Detector for TrailingWhitespace {
    fn name(&self) -> &str {
        "trailing-whitespace"
    }

    fn description(&self) -> &str {
        "Flags lines ending in spaces or tabs"
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
            .filter(|(_, line)| line.ends_with([' ', '\t']))
            .map(|(idx, _)| self.diagnostic("Trailing whitespace".to_string(), idx + 1, NO_FUNCTION))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_exact_lines() {
        let ctx = AnalysisContext::new("clean\nspace \ntab\t\nclean");
        let lines: Vec<usize> = TrailingWhitespace
            .detect(&ctx)
            .iter()
            .map(|d| d.location.line)
            .collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_crlf_is_not_whitespace() {
        let ctx = AnalysisContext::new("a\r\nb\r\n");
        assert!(TrailingWhitespace.detect(&ctx).is_empty());
    }
}

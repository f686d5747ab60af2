use once_cell::sync::Lazy;
use regex::Regex;
use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

static ARITHMETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s[+\-*]\s|[+\-*]=|\+\+").expect("valid arithmetic regex"));

static PRAGMA_MINOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"pragma\s+solidity\s*[\^>=~]*\s*0\.(\d+)").expect("valid pragma regex")
});

/// Compiler 0.8 and later revert on overflow by default.
const CHECKED_ARITHMETIC_MINOR: u32 = 8;

/// Flags arithmetic in sources compiled without built-in overflow checks
/// and without SafeMath.
pub struct IntegerOverflow;

fn has_checked_pragma(source: &str) -> bool {
    PRAGMA_MINOR
        .captures(source)
        .and_then(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .is_some_and(|minor| minor >= CHECKED_ARITHMETIC_MINOR)
}

impl Detector for IntegerOverflow {
    fn name(&self) -> &str {
        "integer-overflow"
    }

    fn description(&self) -> &str {
        "Detects arithmetic without compiler overflow checks or SafeMath"
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
        Some("Compile with pragma solidity ^0.8.0 or use SafeMath for arithmetic.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !ARITHMETIC.is_match(ctx.source())
            || has_checked_pragma(ctx.source())
            || ctx.mentions("safemath")
        {
            return Vec::new();
        }
        vec![self.diagnostic(
            "Arithmetic operations without overflow protection".to_string(),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

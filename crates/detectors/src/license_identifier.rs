use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;

const SPDX_MARKER: &str = "SPDX-License-Identifier";

/// Requires the SPDX license marker on the first line.
pub struct LicenseIdentifier;

impl Detector for LicenseIdentifier {
    fn name(&self) -> &str {
        "license-identifier"
    }

    fn description(&self) -> &str {
        "Checks that the first line carries an SPDX license identifier"
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

    fn recommendation(&self) -> Option<&str> {
        Some("Start the file with `// SPDX-License-Identifier: <license>`.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if ctx.get_line(1).unwrap_or("").contains(SPDX_MARKER) {
            return Vec::new();
        }
        vec![self.diagnostic(
            "Missing SPDX license identifier on the first line".to_string(),
            1,
            NO_FUNCTION,
        )]
    }
}

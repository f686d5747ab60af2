use super::context::AnalysisContext;
use crate::finding::{Category, Confidence, Diagnostic, DiagnosticSource, Severity, SourceLocation};

/// Core trait for the in-process heuristic detectors.
/// Implementors scan the raw text of one Solidity source and return diagnostics.
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector (e.g., "reentrancy-pattern")
    fn name(&self) -> &str;

    /// Human-readable description of what this detector checks
    fn description(&self) -> &str;

    /// Security or style family; decides which fallback slot the detector fills
    fn category(&self) -> Category;

    /// Default severity of diagnostics from this detector
    fn severity(&self) -> Severity;

    /// Default confidence; style detectors report none
    fn confidence(&self) -> Option<Confidence>;

    /// Optional fix hint attached to every diagnostic
    fn recommendation(&self) -> Option<&str> {
        None
    }

    /// Run detection on the given analysis context, return diagnostics
    fn detect(&self, context: &AnalysisContext) -> Vec<Diagnostic>;

    /// Build a diagnostic carrying this detector's defaults.
    fn diagnostic(&self, message: String, line: usize, function: &str) -> Diagnostic {
        Diagnostic {
            source: DiagnosticSource::heuristic(self.category()),
            rule: self.name().to_string(),
            message,
            severity: self.severity(),
            confidence: self.confidence(),
            location: SourceLocation::line(line),
            function: function.to_string(),
            recommendation: self.recommendation().map(str::to_string),
        }
    }
}

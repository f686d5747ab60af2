use super::context::AnalysisContext;
use super::traits::Detector;
use crate::finding::{Category, Diagnostic};

/// Registry that holds the heuristic detectors and runs them against a source.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Register a detector
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Register multiple detectors at once
    pub fn register_all(&mut self, detectors: Vec<Box<dyn Detector>>) {
        for detector in detectors {
            self.register(detector);
        }
    }

    /// Drop every detector the predicate rejects
    pub fn retain(&mut self, mut keep: impl FnMut(&dyn Detector) -> bool) {
        self.detectors.retain(|d| keep(&**d));
    }

    /// Run the detectors of one category, return diagnostics sorted by severity
    pub fn run_category(&self, category: Category, context: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = self
            .detectors
            .iter()
            .filter(|d| d.category() == category)
            .flat_map(|d| d.detect(context))
            .collect();
        // Stable: equal severities keep detector order, then line order.
        diagnostics.sort_by(|a, b| a.severity.cmp(&b.severity));
        diagnostics
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

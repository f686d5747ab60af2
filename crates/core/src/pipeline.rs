use std::path::Path;

use tracing::info;

use crate::backend::{run_tool, LintToolAdapter, SecurityToolAdapter, ToolAdapter};
use crate::config::Config;
use crate::detector::{AnalysisContext, DetectorRegistry};
use crate::finding::{Category, Diagnostic};

/// Diagnostics for one source, one list per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub security: Vec<Diagnostic>,
    pub style: Vec<Diagnostic>,
}

/// Runs the external backends and substitutes heuristics for empty results.
pub struct DetectorPipeline {
    security_tool: Option<Box<dyn ToolAdapter>>,
    lint_tool: Option<Box<dyn ToolAdapter>>,
    heuristics: DetectorRegistry,
}

impl DetectorPipeline {
    /// Heuristics only; add external tools with the `with_*` builders.
    pub fn new(heuristics: DetectorRegistry) -> Self {
        Self {
            security_tool: None,
            lint_tool: None,
            heuristics,
        }
    }

    pub fn from_config(config: &Config, mut heuristics: DetectorRegistry) -> Self {
        heuristics.retain(|d| config.is_detector_enabled(d.name()));
        let mut pipeline = Self::new(heuristics);
        if let Some(command) = config.security_tool() {
            pipeline = pipeline.with_security_tool(Box::new(SecurityToolAdapter::new(command)));
        }
        if let Some(command) = config.lint_tool() {
            pipeline = pipeline.with_lint_tool(Box::new(LintToolAdapter::new(command)));
        }
        pipeline
    }

    pub fn with_security_tool(mut self, adapter: Box<dyn ToolAdapter>) -> Self {
        self.security_tool = Some(adapter);
        self
    }

    pub fn with_lint_tool(mut self, adapter: Box<dyn ToolAdapter>) -> Self {
        self.lint_tool = Some(adapter);
        self
    }

    /// `file` must hold `source`; the external tools read it concurrently.
    pub async fn run(&self, source: &str, file: &Path) -> PipelineOutput {
        let (security_external, style_external) = tokio::join!(
            external(self.security_tool.as_deref(), file),
            external(self.lint_tool.as_deref(), file),
        );

        let context = AnalysisContext::new(source);
        PipelineOutput {
            security: substitute(Category::Security, security_external, || {
                self.heuristics.run_category(Category::Security, &context)
            }),
            style: substitute(Category::Style, style_external, || {
                self.heuristics.run_category(Category::Style, &context)
            }),
        }
    }
}

async fn external(adapter: Option<&dyn ToolAdapter>, file: &Path) -> Vec<Diagnostic> {
    match adapter {
        Some(adapter) => run_tool(adapter, file).await,
        None => Vec::new(),
    }
}

/// The external result when it has anything in it, otherwise the heuristic
/// result. The two are never merged, so a partially successful tool cannot
/// have its findings double counted.
pub fn substitute(
    category: Category,
    external: Vec<Diagnostic>,
    heuristic: impl FnOnce() -> Vec<Diagnostic>,
) -> Vec<Diagnostic> {
    if !external.is_empty() {
        return external;
    }
    let fallback = heuristic();
    info!(
        %category,
        count = fallback.len(),
        "external backend empty; using heuristic detectors"
    );
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, ToolCommand};
    use crate::detector::Detector;
    use crate::finding::*;
    use std::time::Duration;

    struct Always(&'static str, Category, Severity);

    impl Detector for Always {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "always fires"
        }
        fn category(&self) -> Category {
            self.1
        }
        fn severity(&self) -> Severity {
            self.2
        }
        fn confidence(&self) -> Option<Confidence> {
            None
        }
        fn detect(&self, _context: &AnalysisContext) -> Vec<Diagnostic> {
            vec![self.diagnostic("heuristic".to_string(), 1, MULTIPLE_FUNCTIONS)]
        }
    }

    fn heuristics() -> DetectorRegistry {
        let mut registry = DetectorRegistry::new();
        registry.register(Box::new(Always("sec-rule", Category::Security, Severity::High)));
        registry.register(Box::new(Always("style-rule", Category::Style, Severity::Warning)));
        registry
    }

    fn external_diagnostic() -> Diagnostic {
        Diagnostic {
            source: DiagnosticSource::SecurityTool,
            rule: "reentrancy-eth".to_string(),
            message: "external".to_string(),
            severity: Severity::High,
            confidence: Some(Confidence::Medium),
            location: SourceLocation::line(12),
            function: "withdraw".to_string(),
            recommendation: None,
        }
    }

    #[test]
    fn test_substitute_prefers_non_empty_external() {
        let chosen = substitute(Category::Security, vec![external_diagnostic()], || {
            panic!("heuristics must not run when the tool found something")
        });
        assert_eq!(chosen, vec![external_diagnostic()]);
    }

    #[test]
    fn test_substitute_replaces_empty_external() {
        let chosen = substitute(Category::Security, Vec::new(), || {
            vec![external_diagnostic()]
        });
        assert_eq!(chosen.len(), 1);
    }

    #[tokio::test]
    async fn test_no_tools_means_heuristics_only() {
        let pipeline = DetectorPipeline::new(heuristics());
        let out = pipeline.run("contract A {}", Path::new("a.sol")).await;
        let ctx = AnalysisContext::new("contract A {}");
        assert_eq!(
            out.security,
            heuristics().run_category(Category::Security, &ctx)
        );
        assert_eq!(out.style.len(), 1);
        assert_eq!(out.style[0].rule, "style-rule");
    }

    struct FixedTool {
        command: ToolCommand,
        result: Vec<Diagnostic>,
    }

    impl ToolAdapter for FixedTool {
        fn name(&self) -> &str {
            "fixed"
        }
        fn category(&self) -> Category {
            Category::Security
        }
        fn command(&self) -> &ToolCommand {
            &self.command
        }
        fn parse(&self, _stdout: &str) -> Result<Vec<Diagnostic>, BackendError> {
            Ok(self.result.clone())
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_tool_result_excludes_heuristics() {
        let pipeline = DetectorPipeline::new(heuristics()).with_security_tool(Box::new(FixedTool {
            command: ToolCommand::new("true", &[], Duration::from_secs(5)),
            result: vec![external_diagnostic()],
        }));
        let out = pipeline.run("contract A {}", Path::new("a.sol")).await;
        assert_eq!(out.security, vec![external_diagnostic()]);
        assert!(out
            .security
            .iter()
            .all(|d| d.source != DiagnosticSource::SecurityHeuristic));
        // The lint slot has no tool, so its heuristics still apply.
        assert_eq!(out.style.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_tool_is_same_as_empty() {
        let pipeline = DetectorPipeline::new(heuristics()).with_security_tool(Box::new(FixedTool {
            command: ToolCommand::new("solidity-guard-missing-tool", &[], Duration::from_secs(1)),
            result: vec![external_diagnostic()],
        }));
        let out = pipeline.run("contract A {}", Path::new("a.sol")).await;
        assert_eq!(out.security.len(), 1);
        assert_eq!(out.security[0].rule, "sec-rule");
    }
}

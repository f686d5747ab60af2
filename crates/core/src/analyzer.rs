use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::abi::{CompilerToolchain, InterfaceSynthesizer};
use crate::backend::ScopedSource;
use crate::classify;
use crate::config::Config;
use crate::detector::DetectorRegistry;
use crate::error::AnalyzeError;
use crate::fetch::SourceFetcher;
use crate::pipeline::{DetectorPipeline, PipelineOutput};
use crate::report::{AnalysisRecord, SeverityCounts};
use crate::risk;
use crate::structure;
use crate::summary::{self, CommandSummarizer, Summarizer};

/// Assembles an [`AnalysisRecord`] from the extractor, the detector
/// pipeline, the interface synthesizer and the optional summarizer.
///
/// Holds no per-analysis state; one instance can serve concurrent analyses.
pub struct Analyzer {
    pipeline: DetectorPipeline,
    synthesizer: InterfaceSynthesizer,
    summarizer: Option<Box<dyn Summarizer>>,
    temp_dir: Option<PathBuf>,
}

impl Analyzer {
    pub fn new(pipeline: DetectorPipeline, synthesizer: InterfaceSynthesizer) -> Self {
        Self {
            pipeline,
            synthesizer,
            summarizer: None,
            temp_dir: None,
        }
    }

    /// Wire external tools, compiler and summarizer as configured.
    pub fn from_config(config: &Config, heuristics: DetectorRegistry) -> Self {
        let mut analyzer = Self::new(
            DetectorPipeline::from_config(config, heuristics),
            InterfaceSynthesizer::new(config.compiler().map(CompilerToolchain::new)),
        );
        analyzer.temp_dir = config.temp_dir.clone();
        match config.summarizer() {
            Some(command) => analyzer.with_summarizer(Box::new(CommandSummarizer::new(command))),
            None => analyzer,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Box<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Analyze one source text.
    ///
    /// Fails only on empty input (before anything runs) or when the scoped
    /// temporary file cannot be created, written or deleted.
    pub async fn analyze(
        &self,
        source: &str,
        enable_summary: bool,
    ) -> Result<AnalysisRecord, AnalyzeError> {
        if source.trim().is_empty() {
            return Err(AnalyzeError::EmptySource);
        }

        let scoped = ScopedSource::create(source, self.temp_dir.as_deref())?;
        // Polled in order: the pipeline and compiler spawn their processes
        // first, then the extractor scans while they run.
        let (detected, abi, inventory) = tokio::join!(
            self.pipeline.run(source, scoped.path()),
            self.synthesizer.synthesize(source, scoped.path()),
            async { structure::extract(source) },
        );
        scoped.remove()?;

        let PipelineOutput { security, style } = detected;
        let risk_score = risk::score(&security, &style);
        let audit_grade = risk::grade(risk_score, &security);
        if let Some(trigger) = risk::escalation(&security) {
            debug!(rule = %trigger.rule, "grade escalated by rule name");
        }

        let narrative_summary = if enable_summary {
            self.summarize(source, &security, &style).await
        } else {
            None
        };

        info!(
            risk_score,
            grade = %audit_grade,
            security = security.len(),
            style = style.len(),
            "analysis complete"
        );

        Ok(AnalysisRecord {
            risk_score,
            audit_grade,
            contract_category: classify::contract_category(source),
            findings_by_severity: SeverityCounts::from_diagnostics(security.iter().chain(&style)),
            deployment_warnings: classify::deployment_warnings(&security),
            unsafe_constructs: classify::unsafe_constructs(source),
            security_diagnostics: security,
            style_diagnostics: style,
            inventory,
            abi,
            narrative_summary,
            source_hash: fingerprint(source),
            generated_at: chrono::Utc::now(),
        })
    }

    /// Fetch verified source for `address` and analyze it; a registry with
    /// no verified source is rejected exactly like empty input.
    pub async fn analyze_fetched(
        &self,
        fetcher: &dyn SourceFetcher,
        address: &str,
        enable_summary: bool,
    ) -> Result<AnalysisRecord, AnalyzeError> {
        let source = fetcher
            .fetch_verified_source(address)
            .await
            .unwrap_or_default();
        self.analyze(&source, enable_summary).await
    }

    async fn summarize(
        &self,
        source: &str,
        security: &[crate::finding::Diagnostic],
        style: &[crate::finding::Diagnostic],
    ) -> Option<String> {
        let Some(summarizer) = &self.summarizer else {
            info!("summary requested but no summarizer is configured");
            return None;
        };
        summarizer
            .summarize(summary::excerpt(source), security, style)
            .await
    }
}

/// SHA-256 of the text, hex encoded
pub fn fingerprint(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Diagnostic;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn analyzer() -> Analyzer {
        Analyzer::new(
            DetectorPipeline::new(DetectorRegistry::new()),
            InterfaceSynthesizer::heuristic(),
        )
    }

    struct CountingSummarizer(Arc<AtomicUsize>);

    #[async_trait]
    impl Summarizer for CountingSummarizer {
        async fn summarize(
            &self,
            excerpt: &str,
            _security: &[Diagnostic],
            _style: &[Diagnostic],
        ) -> Option<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Some(format!("{} chars reviewed", excerpt.chars().count()))
        }
    }

    struct NoSource;

    #[async_trait]
    impl SourceFetcher for NoSource {
        async fn fetch_verified_source(&self, _address: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_fingerprint() {
        assert_eq!(fingerprint("a"), fingerprint("a"));
        assert_ne!(fingerprint("a"), fingerprint("b"));
        assert_eq!(fingerprint("a").len(), 64);
    }

    #[tokio::test]
    async fn test_empty_source_rejected() {
        for source in ["", "  \n\t"] {
            let err = analyzer().analyze(source, false).await.unwrap_err();
            assert!(err.is_input_error());
        }
    }

    #[tokio::test]
    async fn test_absent_fetched_source_is_empty_input() {
        let err = analyzer()
            .analyze_fetched(&NoSource, "0xabc", false)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::EmptySource));
    }

    #[tokio::test]
    async fn test_record_shape() {
        let source = "contract Counter {\n    uint256 public count;\n    function inc() external {\n        count += 1;\n    }\n}\n";
        let record = analyzer().analyze(source, false).await.unwrap();
        assert_eq!(record.risk_score, 0);
        assert_eq!(record.audit_grade, risk::AuditGrade::A);
        assert_eq!(record.inventory.contracts[0].name, "Counter");
        assert_eq!(record.abi.len(), 2);
        assert_eq!(record.source_hash, fingerprint(source));
        assert!(record.narrative_summary.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("riskScore").is_some());
        assert!(json.get("generatedAt").is_some());
        assert!(json.get("narrativeSummary").is_none());
    }

    #[tokio::test]
    async fn test_summary_only_when_enabled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer =
            analyzer().with_summarizer(Box::new(CountingSummarizer(Arc::clone(&calls))));
        let long_source = format!("contract A {{}}\n{}", "/".repeat(5000));

        let record = analyzer.analyze(&long_source, false).await.unwrap();
        assert!(record.narrative_summary.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let record = analyzer.analyze(&long_source, true).await.unwrap();
        assert_eq!(
            record.narrative_summary.as_deref(),
            Some("2000 chars reviewed")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summary_without_summarizer_is_omitted() {
        let record = analyzer().analyze("contract A {}", true).await.unwrap();
        assert!(record.narrative_summary.is_none());
    }
}

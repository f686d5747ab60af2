use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use solidity_guard::config::{Config, CONFIG_FILE};
use solidity_guard::detector::DetectorRegistry;
use solidity_guard::risk::AuditGrade;
use solidity_guard::{AnalysisRecord, Analyzer};

use crate::output;
use crate::OutputFormat;

pub struct AnalyzeArgs {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub summary: bool,
    pub detectors: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
    pub no_color: bool,
}

/// One analyzed file and its record
pub struct FileAnalysis {
    pub file: PathBuf,
    pub record: AnalysisRecord,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::load(&config_path)?;

    let files = collect_sources(&args.path, &config)?;
    if files.is_empty() {
        anyhow::bail!("No .sol files found under {}", args.path.display());
    }
    if !args.quiet {
        eprintln!("Analyzing {} files...", files.len());
    }

    let analyzer = Analyzer::from_config(&config, build_registry(&args));
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let handle = runtime.handle();

    let results: Vec<Result<Option<FileAnalysis>>> = files
        .par_iter()
        .map(|file| {
            let source = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            match handle.block_on(analyzer.analyze(&source, args.summary)) {
                Ok(record) => Ok(Some(FileAnalysis {
                    file: file.clone(),
                    record,
                })),
                Err(e) if e.is_input_error() => {
                    warn!(file = %file.display(), "skipping: {}", e);
                    Ok(None)
                }
                Err(e) => Err(e).with_context(|| format!("Failed to analyze {}", file.display())),
            }
        })
        .collect();

    let mut analyses = Vec::with_capacity(results.len());
    for result in results {
        if let Some(analysis) = result? {
            analyses.push(analysis);
        }
    }
    info!(files = analyses.len(), "analysis finished");

    match args.format {
        OutputFormat::Json => output::json::print(&analyses)?,
        OutputFormat::Text => output::text::print(&analyses, args.quiet, args.no_color)?,
    }

    if analyses
        .iter()
        .any(|a| a.record.audit_grade == AuditGrade::C)
    {
        std::process::exit(1);
    }

    Ok(())
}

fn build_registry(args: &AnalyzeArgs) -> DetectorRegistry {
    let mut all_dets = solidity_guard_detectors::all_detectors();

    if let Some(ref names) = args.detectors {
        all_dets.retain(|d| names.iter().any(|n| n == d.name()));
    }
    if let Some(ref names) = args.exclude {
        all_dets.retain(|d| !names.iter().any(|n| n == d.name()));
    }

    let mut registry = DetectorRegistry::new();
    registry.register_all(all_dets);
    if registry.is_empty() {
        warn!("no heuristic detectors selected; fallbacks will report nothing");
    } else {
        debug!(detectors = registry.len(), "heuristic detectors registered");
    }
    registry
}

/// A single file is taken as given; a directory is walked for `.sol`
/// files not matched by a suppression glob.
fn collect_sources(path: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "sol"))
        .filter(|p| !config.is_file_excluded(p))
        .collect();
    files.sort();
    Ok(files)
}

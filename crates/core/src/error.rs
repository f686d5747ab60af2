use std::fmt;

use thiserror::Error;

/// Step of the scoped temporary file's lifecycle that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempFileStage {
    Create,
    Write,
    Delete,
}

impl fmt::Display for TempFileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempFileStage::Create => write!(f, "create"),
            TempFileStage::Write => write!(f, "write"),
            TempFileStage::Delete => write!(f, "delete"),
        }
    }
}

/// The only failures an analysis can surface to its caller.
/// Backend and compiler trouble never lands here; it degrades to empty results.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("source text is empty")]
    EmptySource,

    #[error("failed to {stage} scoped source file: {source}")]
    TempFile {
        stage: TempFileStage,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyzeError {
    pub fn temp_file(stage: TempFileStage, source: std::io::Error) -> Self {
        AnalyzeError::TempFile { stage, source }
    }

    /// Whether the caller supplied bad input (as opposed to an I/O fault)
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalyzeError::EmptySource)
    }
}

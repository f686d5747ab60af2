use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{AnalyzeError, TempFileStage};

/// The analyzed text materialized on disk for external tools.
///
/// Bound to one analysis. [`ScopedSource::remove`] deletes it and reports
/// failures; if the value is dropped on any other path (early return, panic,
/// cancelled future) the file is still deleted.
pub struct ScopedSource {
    file: NamedTempFile,
}

impl ScopedSource {
    /// Write `source` to a new file in `dir`, or the system temp directory.
    pub fn create(source: &str, dir: Option<&Path>) -> Result<Self, AnalyzeError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("solidity-guard-").suffix(".sol");
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| AnalyzeError::temp_file(TempFileStage::Create, e))?;
        file.write_all(source.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| AnalyzeError::temp_file(TempFileStage::Write, e))?;
        debug!(path = %file.path().display(), bytes = source.len(), "materialized source");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn remove(self) -> Result<(), AnalyzeError> {
        self.file
            .close()
            .map_err(|e| AnalyzeError::temp_file(TempFileStage::Delete, e))
    }
}

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use solidity_guard::AnalysisRecord;

use crate::commands::analyze::FileAnalysis;

#[derive(Serialize)]
struct FileEntry<'a> {
    file: &'a Path,
    #[serde(flatten)]
    record: &'a AnalysisRecord,
}

/// A single file prints its record; several print an array tagged by file.
pub fn print(analyses: &[FileAnalysis]) -> Result<()> {
    let json = match analyses {
        [single] => serde_json::to_string_pretty(&single.record)?,
        _ => {
            let entries: Vec<FileEntry> = analyses
                .iter()
                .map(|a| FileEntry {
                    file: &a.file,
                    record: &a.record,
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    println!("{json}");
    Ok(())
}

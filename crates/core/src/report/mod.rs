pub mod types;

pub use types::{AnalysisRecord, SeverityCounts};

pub mod abi;
pub mod analyzer;
pub mod backend;
pub mod classify;
pub mod config;
pub mod detector;
pub mod error;
pub mod fetch;
pub mod finding;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod structure;
pub mod summary;

pub use analyzer::Analyzer;
pub use error::AnalyzeError;
pub use report::AnalysisRecord;

pub mod lint;
pub mod runner;
pub mod security;
pub mod workspace;

pub use lint::LintToolAdapter;
pub use runner::{capture, run_tool, BackendError, ToolAdapter, ToolCommand};
pub use security::SecurityToolAdapter;
pub use workspace::ScopedSource;

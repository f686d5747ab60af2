pub mod extractor;
pub mod inventory;
pub mod scanner;

pub use extractor::extract;
pub use inventory::*;

pub mod cli;
pub mod config;
pub mod runner;

// Re-export core types for convenience
pub use ctxfind_core::{Language, SearchTarget, SearchType};
pub use runner::{FileMatch, Input, RunSummary, SearchRunner};

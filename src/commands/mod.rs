//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod analyze;

// Re-export main command functions
pub use analyze::{analyze_file, execute_analyze, validate_args, AnalyzeArgs};

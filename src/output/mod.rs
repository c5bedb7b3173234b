//! Output writers for analysis reports.
//!
//! This module handles writing reports to disk in two formats:
//! - Human-readable text (the default report)
//! - JSON (optional, for scripting)

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_report_json, write_report_json, SavedReport};
pub use text::{render_report, write_report};

use crate::utils::config::REPORT_TIME_FORMAT;
use crate::utils::error::OutputError;
use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report header: what was analyzed and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub input_file: String,
    pub generated_at: String,
}

impl ReportHeader {
    /// Header stamped with the current local time
    pub fn now(input_file: impl Into<String>) -> Self {
        Self {
            input_file: input_file.into(),
            generated_at: Local::now().format(REPORT_TIME_FORMAT).to_string(),
        }
    }
}

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validate an output path and create its parent directories
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

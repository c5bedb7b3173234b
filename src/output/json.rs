//! JSON report output writer.
//!
//! Writes the report inside a versioned envelope so saved files can be
//! checked before they are read back.

use super::{calculate_file_size, prepare_output_path, ReportHeader};
use crate::aggregator::Report;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Top-level structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReport {
    /// Schema version for compatibility checking
    pub version: String,

    #[serde(flatten)]
    pub header: ReportHeader,

    pub report: Report,
}

impl SavedReport {
    pub fn new(header: ReportHeader, report: Report) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            header,
            report,
        }
    }
}

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report_json(
    report: &Report,
    header: &ReportHeader,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let saved = SavedReport::new(header.clone(), report.clone());

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &saved)?;
    writer.flush()?;

    info!(
        "JSON report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a JSON report back from disk
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reused for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::UnsupportedVersion` - written by an incompatible schema
pub fn read_report_json(input_path: impl AsRef<Path>) -> Result<SavedReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let saved: SavedReport = serde_json::from_reader(BufReader::new(file))?;

    let major = |v: &str| v.split('.').next().map(str::to_string);
    if major(&saved.version) != major(SCHEMA_VERSION) {
        return Err(OutputError::UnsupportedVersion(saved.version));
    }

    debug!(
        "Report loaded: version {}, input {}",
        saved.version, saved.header.input_file
    );

    Ok(saved)
}

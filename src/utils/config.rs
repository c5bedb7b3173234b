//! Configuration and constants for the analyzer.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default path for the text report
pub const DEFAULT_OUTPUT_FILE: &str = "analysis_results.txt";

/// Packets at or below this size carrying an ACK keyword classify as ACK
pub const ACK_MAX_PACKET_SIZE: u64 = 60;

// Synthetic sequence numbers are CRC-32 of the line reduced into [0, 1_000_000)
pub const SYNTHETIC_SEQ_MODULUS: u64 = 1_000_000;

// Diagnostics for unparsable lines
pub const DEFAULT_MAX_PROBLEM_LINES: usize = 10;
pub const PROBLEM_LINE_MIN_LEN: usize = 10;
pub const PROBLEM_LINE_MAX_CHARS: usize = 100;

/// Timestamp format used in the report header
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

//! TCP Trace Analyzer
//!
//! Traffic metrics for ns-3 ASCII packet traces: throughput,
//! retransmission rate, packet-type distribution and per-flow statistics.
//!
//! This crate provides the core implementation for the
//! `trace-analyzer` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-analyzer experiment.tr -o analysis_results.txt
//! ```
//!
//! Or from code:
//!
//! ```
//! use tcp_trace_analyzer::aggregator::aggregate;
//!
//! let report = aggregate(["r 1.000 /NodeList/0/DeviceList/0 length: 40 Seq=100 [SYN]"]);
//! assert_eq!(report.parsed_lines, 1);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

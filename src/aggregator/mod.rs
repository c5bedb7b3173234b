//! Aggregation of classified trace events into a traffic report.
//!
//! This module turns a stream of trace lines into:
//! - Event-type and packet-type distributions
//! - Byte totals, duration and throughput
//! - Per-flow retransmission detection

pub mod flow;
pub mod metrics;
pub mod report;
pub mod tally;
pub mod trace;

// Re-export main types and functions
pub use flow::{FlowKey, FlowObservation, FlowState, FlowTable};
pub use report::{PacketBucket, ProblemLine, Report};
pub use trace::{aggregate, aggregate_reader, AggregatorConfig, LineOutcome, TraceAggregator};

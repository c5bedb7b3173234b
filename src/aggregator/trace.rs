//! Single-pass aggregation over trace lines.
//!
//! `TraceAggregator` owns all running state for one analysis run. Lines are
//! fed in arrival order; `finish` consumes the aggregator and produces the
//! `Report`, so a finished run cannot be resumed.

use super::flow::{FlowObservation, FlowTable};
use super::metrics;
use super::report::{PacketBucket, ProblemLine, Report};
use super::tally::Tally;
use crate::parser::{classify, Event, EventType, SeqSource};
use crate::utils::config::{DEFAULT_MAX_PROBLEM_LINES, PROBLEM_LINE_MAX_CHARS, PROBLEM_LINE_MIN_LEN};
use log::{debug, trace};
use std::io::{self, BufRead};

/// Aggregator configuration
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Unparsable lines kept for the report
    pub max_problem_lines: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_problem_lines: DEFAULT_MAX_PROBLEM_LINES,
        }
    }
}

impl AggregatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_problem_lines(mut self, max_problem_lines: usize) -> Self {
        self.max_problem_lines = max_problem_lines;
        self
    }
}

/// What happened to one fed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Parsed,
    Failed,
}

/// Running metrics and flow state for one trace
#[derive(Debug)]
pub struct TraceAggregator {
    config: AggregatorConfig,

    parsed_lines: u64,
    failed_lines: u64,
    problem_lines: Vec<ProblemLine>,

    event_types: Tally<EventType>,
    packet_types: Tally<PacketBucket>,

    start_time: Option<f64>,
    end_time: f64,

    total_packets: u64,
    retransmitted_packets: u64,
    total_bytes: u64,
    synthetic_seqs: u64,

    flows: FlowTable,
}

impl Default for TraceAggregator {
    fn default() -> Self {
        Self::with_config(AggregatorConfig::default())
    }
}

impl TraceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AggregatorConfig) -> Self {
        Self {
            config,
            parsed_lines: 0,
            failed_lines: 0,
            problem_lines: Vec::new(),
            event_types: Tally::new(),
            packet_types: Tally::new(),
            start_time: None,
            end_time: 0.0,
            total_packets: 0,
            retransmitted_packets: 0,
            total_bytes: 0,
            synthetic_seqs: 0,
            flows: FlowTable::new(),
        }
    }

    /// Classify and account for one input line
    ///
    /// `line_number` is 1-based and counts blank lines too, so diagnostics
    /// point at the right place in the file.
    pub fn feed_line(&mut self, line_number: usize, line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }

        match classify(line) {
            Some(event) => {
                self.feed_event(&event);
                LineOutcome::Parsed
            }
            None => {
                self.record_failure(line_number, line);
                LineOutcome::Failed
            }
        }
    }

    /// Account for an already classified event
    pub fn feed_event(&mut self, event: &Event) {
        self.parsed_lines += 1;
        self.event_types.increment(event.event_type);

        if self.start_time.is_none() {
            self.start_time = Some(event.time);
        }
        self.end_time = self.end_time.max(event.time);

        self.packet_types.increment(event.packet_type.into());
        if event.seq_source == SeqSource::Synthetic {
            self.synthetic_seqs += 1;
        }

        if !event.packet_type.carries_payload_metrics() {
            return;
        }

        self.total_packets += 1;
        self.total_bytes = self.total_bytes.saturating_add(event.packet_size);

        if self.flows.observe(event.node_id, event.seq) == FlowObservation::Retransmission {
            trace!(
                "Retransmission on node {} seq {} at {}",
                event.node_id,
                event.seq,
                event.time
            );
            self.retransmitted_packets += 1;
            self.packet_types.increment(PacketBucket::Retransmissions);
        }
    }

    fn record_failure(&mut self, line_number: usize, line: &str) {
        self.failed_lines += 1;

        let trimmed = line.trim();
        trace!("Line {} not parsed", line_number);

        if trimmed.chars().count() > PROBLEM_LINE_MIN_LEN
            && self.problem_lines.len() < self.config.max_problem_lines
        {
            self.problem_lines.push(ProblemLine {
                line_number,
                text: trimmed.chars().take(PROBLEM_LINE_MAX_CHARS).collect(),
            });
        }
    }

    pub fn parsed_lines(&self) -> u64 {
        self.parsed_lines
    }

    pub fn failed_lines(&self) -> u64 {
        self.failed_lines
    }

    /// Compute derived metrics and produce the report
    pub fn finish(self) -> Report {
        let end_time = self.end_time;
        let duration = metrics::duration(self.start_time, end_time);
        let unique_flows = self.flows.len() as u64;

        debug!(
            "Aggregation finished: {} parsed, {} failed, {} flows",
            self.parsed_lines, self.failed_lines, unique_flows
        );

        Report {
            parsed_lines: self.parsed_lines,
            failed_lines: self.failed_lines,
            success_rate: metrics::success_rate(self.parsed_lines, self.failed_lines),
            event_types: self.event_types.into_entries(),
            total_packets: self.total_packets,
            retransmitted_packets: self.retransmitted_packets,
            retransmission_rate: metrics::retransmission_rate(
                self.retransmitted_packets,
                self.total_packets,
            ),
            total_bytes: self.total_bytes,
            start_time: self.start_time,
            end_time: self.start_time.map(|_| end_time),
            duration,
            throughput_bps: metrics::throughput_bps(self.total_bytes, duration),
            packet_types: self.packet_types.into_entries(),
            unique_flows,
            avg_packets_per_flow: metrics::avg_packets_per_flow(self.total_packets, unique_flows),
            synthetic_seqs: self.synthetic_seqs,
            problem_lines: self.problem_lines,
        }
    }
}

/// Aggregate a sequence of lines with default settings
///
/// **Public** - main entry point for in-memory input
pub fn aggregate<I, S>(lines: I) -> Report
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = TraceAggregator::new();
    for (index, line) in lines.into_iter().enumerate() {
        aggregator.feed_line(index + 1, line.as_ref());
    }
    aggregator.finish()
}

/// Stream a reader line by line through a fresh aggregator
///
/// Only one line is held at a time. Bytes that are not valid UTF-8 are
/// replaced rather than aborting the run; such a line normally fails the
/// anchor match and shows up in the diagnostics.
pub fn aggregate_reader<R: BufRead>(
    mut reader: R,
    config: AggregatorConfig,
) -> io::Result<Report> {
    let mut aggregator = TraceAggregator::with_config(config);
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        aggregator.feed_line(line_number, &line);

        if line_number % 1_000_000 == 0 {
            debug!("Processed {} lines", line_number);
        }
    }

    Ok(aggregator.finish())
}

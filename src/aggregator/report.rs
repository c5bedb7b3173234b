//! Final analysis report, built once at end of stream.

use crate::parser::schema::{EventType, PacketType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Packet-type distribution bucket
///
/// The packet types plus a synthetic bucket counting retransmissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketBucket {
    #[serde(rename = "SYN")]
    Syn,
    #[serde(rename = "FIN")]
    Fin,
    #[serde(rename = "RST")]
    Rst,
    #[serde(rename = "ACK")]
    Ack,
    Data,
    Retransmissions,
}

impl From<PacketType> for PacketBucket {
    fn from(packet_type: PacketType) -> Self {
        match packet_type {
            PacketType::Syn => Self::Syn,
            PacketType::Fin => Self::Fin,
            PacketType::Rst => Self::Rst,
            PacketType::Ack => Self::Ack,
            PacketType::Data => Self::Data,
        }
    }
}

impl fmt::Display for PacketBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Syn => "SYN",
            Self::Fin => "FIN",
            Self::Rst => "RST",
            Self::Ack => "ACK",
            Self::Data => "Data",
            Self::Retransmissions => "Retransmissions",
        };
        f.write_str(label)
    }
}

/// An unparsable line kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemLine {
    /// 1-based line number in the input
    pub line_number: usize,

    /// Trimmed text, truncated
    pub text: String,
}

/// Traffic metrics for one trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    // Processing statistics
    pub parsed_lines: u64,
    pub failed_lines: u64,
    /// Parsed share of non-blank lines, in percent
    pub success_rate: f64,

    /// Event counts in first-seen order
    pub event_types: Vec<(EventType, u64)>,

    // Core metrics, over Data and ACK packets only
    pub total_packets: u64,
    pub retransmitted_packets: u64,
    pub retransmission_rate: f64,
    pub total_bytes: u64,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<f64>,
    /// Seconds between the first parsed event and the latest timestamp
    pub duration: f64,
    /// Average throughput in bits per second
    pub throughput_bps: f64,

    /// Packet counts in first-seen order
    pub packet_types: Vec<(PacketBucket, u64)>,

    // Flow information
    pub unique_flows: u64,
    pub avg_packets_per_flow: f64,

    /// Parsed events whose sequence number came from the line hash
    pub synthetic_seqs: u64,

    /// First unparsable lines, in input order
    pub problem_lines: Vec<ProblemLine>,
}

impl Report {
    /// Non-blank lines read
    pub fn total_lines(&self) -> u64 {
        self.parsed_lines + self.failed_lines
    }

    pub fn total_kb(&self) -> f64 {
        self.total_bytes as f64 / 1024.0
    }

    pub fn throughput_mbps(&self) -> f64 {
        self.throughput_bps / 1e6
    }

    pub fn event_count(&self, event_type: EventType) -> u64 {
        self.event_types
            .iter()
            .find(|(k, _)| *k == event_type)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn packet_count(&self, bucket: PacketBucket) -> u64 {
        self.packet_types
            .iter()
            .find(|(k, _)| *k == bucket)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// One-line summary for logging and the console
    pub fn summary(&self) -> String {
        format!(
            "Parsed: {} | Failed: {} | Success: {:.1}% | Packets: {} | Retransmissions: {} ({:.2}%)",
            self.parsed_lines,
            self.failed_lines,
            self.success_rate,
            self.total_packets,
            self.retransmitted_packets,
            self.retransmission_rate
        )
    }
}

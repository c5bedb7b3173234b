//! Event record definitions for parsed trace lines.
//!
//! One `Event` is produced per interpretable line and is consumed
//! immediately by the aggregator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Queue/receive event kind, from the leading symbol of a trace line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    /// `r` - packet received
    #[serde(rename = "r")]
    Receive,
    /// `+` - packet enqueued
    #[serde(rename = "+")]
    Enqueue,
    /// `-` - packet dequeued
    #[serde(rename = "-")]
    Dequeue,
}

impl EventType {
    /// Map a trace symbol to its event type
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'r' => Some(Self::Receive),
            '+' => Some(Self::Enqueue),
            '-' => Some(Self::Dequeue),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Receive => 'r',
            Self::Enqueue => '+',
            Self::Dequeue => '-',
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// TCP header flag token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TcpFlag {
    Syn,
    Ack,
    Fin,
    Rst,
    Psh,
}

impl std::str::FromStr for TcpFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SYN" => Ok(Self::Syn),
            "ACK" => Ok(Self::Ack),
            "FIN" => Ok(Self::Fin),
            "RST" => Ok(Self::Rst),
            "PSH" => Ok(Self::Psh),
            other => Err(format!("unknown TCP flag: {}", other)),
        }
    }
}

impl TcpFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syn => "SYN",
            Self::Ack => "ACK",
            Self::Fin => "FIN",
            Self::Rst => "RST",
            Self::Psh => "PSH",
        }
    }
}

/// Packet category, chosen with precedence SYN > FIN > RST > ACK > Data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PacketType {
    #[serde(rename = "SYN")]
    Syn,
    #[serde(rename = "FIN")]
    Fin,
    #[serde(rename = "RST")]
    Rst,
    #[serde(rename = "ACK")]
    Ack,
    Data,
}

impl PacketType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Syn => "SYN",
            Self::Fin => "FIN",
            Self::Rst => "RST",
            Self::Ack => "ACK",
            Self::Data => "Data",
        }
    }

    /// Data and ACK packets feed the throughput and flow metrics
    pub fn carries_payload_metrics(self) -> bool {
        matches!(self, Self::Data | Self::Ack)
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which extraction tier produced an event's sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeqSource {
    /// `[FLAGS] Seq=N`
    FlagList,
    /// Bare `Seq=N`
    SeqField,
    /// First port of `TcpHeader (... N > M ...)`
    HeaderPorts,
    /// Hash of the line text
    Synthetic,
}

/// A single classified trace event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: EventType,

    /// Simulation time in seconds
    pub time: f64,

    pub node_id: u64,

    /// Packet length in bytes
    pub packet_size: u64,

    pub seq: u64,
    pub seq_source: SeqSource,

    pub flags: BTreeSet<TcpFlag>,
    pub packet_type: PacketType,

    /// Source line text, trimmed
    pub raw_line: String,
}

impl Event {
    pub fn has_flag(&self, flag: TcpFlag) -> bool {
        self.flags.contains(&flag)
    }
}

//! Field extraction for ns-3 ASCII trace lines.
//!
//! Extraction runs in tiers. The four anchor fields (event symbol, time,
//! node index, packet length) must all be present or the line is rejected.
//! The sequence number is then looked up through an ordered chain of
//! patterns and, if none matches, derived from a hash of the line so that
//! every accepted line still has a flow key.

use super::schema::{EventType, SeqSource, TcpFlag};
use crate::utils::config::SYNTHETIC_SEQ_MODULUS;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    // `[0-9]` rather than `\d`: Unicode digits would match but not parse.
    static ref ANCHOR_RE: Regex = Regex::new(
        r"^([r+\-])\s+([0-9]+\.[0-9]+)\s+/NodeList/([0-9]+)/.*length:\s*([0-9]+)"
    )
    .unwrap();
    static ref FLAG_LIST_SEQ_RE: Regex = Regex::new(r"\[([^\]]+)\]\s*Seq=([0-9]+)").unwrap();
    static ref SEQ_FIELD_RE: Regex = Regex::new(r"Seq=([0-9]+)").unwrap();
    static ref HEADER_PORTS_RE: Regex =
        Regex::new(r"TcpHeader.*?([0-9]+)\s*>\s*([0-9]+)").unwrap();
}

/// Flags detected by plain keyword search, bracketed or bare
const KEYWORD_FLAGS: [TcpFlag; 3] = [TcpFlag::Syn, TcpFlag::Fin, TcpFlag::Rst];

/// The mandatory fields of a trace line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub event_type: EventType,
    pub time: f64,
    pub node_id: u64,
    pub packet_size: u64,
}

/// Extract the four anchor fields, all or nothing
///
/// Once the pattern matches the line is accepted: integer anchors too large
/// for `u64` saturate to `u64::MAX`.
pub fn extract_anchors(line: &str) -> Option<Anchors> {
    let caps = ANCHOR_RE.captures(line)?;

    let event_type = caps[1].chars().next().and_then(EventType::from_symbol)?;
    let time = caps[2].parse::<f64>().ok()?;
    let node_id = parse_saturating(&caps[3]);
    let packet_size = parse_saturating(&caps[4]);

    Some(Anchors {
        event_type,
        time,
        node_id,
        packet_size,
    })
}

/// Parse an ASCII digit run, clamping overflow to `u64::MAX`
fn parse_saturating(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Result of one sequence-number extraction tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqMatch {
    pub seq: u64,
    /// Flags parsed from a bracketed list, if the tier reads one
    pub flags: Vec<TcpFlag>,
    pub source: SeqSource,
}

/// Pattern-based sequence-number extractors, tried in `CHAIN` order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqPattern {
    /// `[SYN|ACK] Seq=42`
    FlagList,
    /// `Seq=42` anywhere in the line
    SeqField,
    /// `TcpHeader (49153 > 9 ...)`, first number taken
    HeaderPorts,
}

impl SeqPattern {
    pub const CHAIN: [SeqPattern; 3] = [Self::FlagList, Self::SeqField, Self::HeaderPorts];

    pub fn source(self) -> SeqSource {
        match self {
            Self::FlagList => SeqSource::FlagList,
            Self::SeqField => SeqSource::SeqField,
            Self::HeaderPorts => SeqSource::HeaderPorts,
        }
    }

    /// Try this pattern against a line
    ///
    /// A number too large for `u64` counts as no match, so the chain moves on.
    pub fn try_extract(self, line: &str) -> Option<SeqMatch> {
        let (seq, flags) = match self {
            Self::FlagList => {
                let caps = FLAG_LIST_SEQ_RE.captures(line)?;
                let seq = caps[2].parse::<u64>().ok()?;
                (seq, parse_flag_list(&caps[1]))
            }
            Self::SeqField => {
                let caps = SEQ_FIELD_RE.captures(line)?;
                (caps[1].parse::<u64>().ok()?, Vec::new())
            }
            Self::HeaderPorts => {
                let caps = HEADER_PORTS_RE.captures(line)?;
                (caps[1].parse::<u64>().ok()?, Vec::new())
            }
        };

        Some(SeqMatch {
            seq,
            flags,
            source: self.source(),
        })
    }
}

/// Run the extractor chain, falling back to a synthetic number
///
/// Never fails: the first pattern that matches wins, and a line with no
/// recognizable sequence number gets `synthetic_seq(line)`.
pub fn extract_seq(line: &str) -> SeqMatch {
    if let Some(found) = SeqPattern::CHAIN
        .iter()
        .find_map(|pattern| pattern.try_extract(line))
    {
        trace!("seq {} from {:?}", found.seq, found.source);
        return found;
    }

    let seq = synthetic_seq(line);
    trace!("seq {} synthesized from line hash", seq);
    SeqMatch {
        seq,
        flags: Vec::new(),
        source: SeqSource::Synthetic,
    }
}

/// Deterministic placeholder sequence number for a line
///
/// CRC-32 of the trimmed text, reduced into `[0, SYNTHETIC_SEQ_MODULUS)`.
/// Identical lines always map to the same value, across runs and platforms.
pub fn synthetic_seq(line: &str) -> u64 {
    u64::from(crc32fast::hash(line.trim().as_bytes())) % SYNTHETIC_SEQ_MODULUS
}

/// Parse a pipe-delimited flag list such as `SYN|ACK`
///
/// Unknown tokens are skipped.
pub fn parse_flag_list(list: &str) -> Vec<TcpFlag> {
    list.split('|')
        .filter_map(|token| token.parse::<TcpFlag>().ok())
        .collect()
}

/// Control flags whose keyword appears anywhere in the line
pub fn keyword_flags(line: &str) -> impl Iterator<Item = TcpFlag> + '_ {
    KEYWORD_FLAGS
        .into_iter()
        .filter(move |flag| line.contains(flag.as_str()))
}

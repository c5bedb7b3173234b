//! Line classifier: raw trace line in, `Event` out.
//!
//! Pure function of the line. The only failure is a missing anchor field,
//! reported as `None`; everything after that degrades instead of failing.

use super::extract::{extract_anchors, extract_seq, keyword_flags};
use super::schema::{Event, PacketType, TcpFlag};
use crate::utils::config::ACK_MAX_PACKET_SIZE;
use std::collections::BTreeSet;

/// Classify a single trace line
///
/// **Public** - main entry point for parsing
///
/// # Returns
/// * `Some(Event)` - every field populated
/// * `None` - the line lacks one of the anchor fields (NotParsed)
pub fn classify(line: &str) -> Option<Event> {
    let anchors = extract_anchors(line)?;

    let seq_match = extract_seq(line);

    let mut flags: BTreeSet<TcpFlag> = seq_match.flags.into_iter().collect();
    flags.extend(keyword_flags(line));

    let packet_type = classify_packet(line, anchors.packet_size);
    if packet_type == PacketType::Ack {
        flags.insert(TcpFlag::Ack);
    }

    Some(Event {
        event_type: anchors.event_type,
        time: anchors.time,
        node_id: anchors.node_id,
        packet_size: anchors.packet_size,
        seq: seq_match.seq,
        seq_source: seq_match.source,
        flags,
        packet_type,
        raw_line: line.trim().to_string(),
    })
}

/// Pick the packet type by keyword, first match wins
///
/// Control flags dominate: an ACK-sized line mentioning SYN is still SYN.
/// ACK only applies at or below `ACK_MAX_PACKET_SIZE` bytes.
pub fn classify_packet(line: &str, packet_size: u64) -> PacketType {
    if line.contains("SYN") {
        PacketType::Syn
    } else if line.contains("FIN") {
        PacketType::Fin
    } else if line.contains("RST") {
        PacketType::Rst
    } else if line.contains("ACK") && packet_size <= ACK_MAX_PACKET_SIZE {
        PacketType::Ack
    } else {
        PacketType::Data
    }
}

//! Trace line parsing and classification.
//!
//! This module handles:
//! - Extracting anchor fields from ns-3 ASCII trace lines
//! - Recovering sequence numbers through a fallback chain
//! - Classifying packets into SYN/FIN/RST/ACK/Data

pub mod classifier;
pub mod extract;
pub mod schema;

// Re-export main types
pub use classifier::{classify, classify_packet};
pub use extract::{extract_seq, synthetic_seq, SeqMatch, SeqPattern};
pub use schema::{Event, EventType, PacketType, SeqSource, TcpFlag};

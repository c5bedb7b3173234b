//! Per-flow sequence history used for retransmission detection.
//!
//! Flows are keyed by `(node_id, seq)`. This groups packets that reuse a
//! sequence number on the same node even when they belong to different
//! connections; the key is kept that way so counts stay comparable with
//! earlier analysis runs.

use std::collections::{HashMap, HashSet};

/// Composite flow identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowKey {
    pub node_id: u64,
    pub seq: u64,
}

impl FlowKey {
    pub fn new(node_id: u64, seq: u64) -> Self {
        Self { node_id, seq }
    }
}

/// State for one flow key, created on first sighting
#[derive(Debug, Clone, Default)]
pub struct FlowState {
    pub seen_seqs: HashSet<u64>,

    /// Packets attributed to this flow, retransmissions excluded
    pub packet_count: u64,
}

/// Outcome of recording a packet against its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowObservation {
    New,
    Retransmission,
}

/// All flows seen during one analysis run
///
/// Memory grows with the number of distinct keys, not with trace length.
#[derive(Debug, Default)]
pub struct FlowTable {
    flows: HashMap<FlowKey, FlowState>,
}

impl FlowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a Data/ACK packet, check-then-insert on the flow's history
    pub fn observe(&mut self, node_id: u64, seq: u64) -> FlowObservation {
        let state = self.flows.entry(FlowKey::new(node_id, seq)).or_default();

        if state.seen_seqs.insert(seq) {
            state.packet_count += 1;
            FlowObservation::New
        } else {
            FlowObservation::Retransmission
        }
    }

    /// Number of distinct flow keys created
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn get(&self, key: &FlowKey) -> Option<&FlowState> {
        self.flows.get(key)
    }
}

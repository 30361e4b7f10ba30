//! Best-first open set with lazy deletion.
//!
//! Entries are never removed when a node's cost improves or the node is
//! closed. The engine discards stale entries when it pops them, so the heap
//! may hold several entries for the same node at once.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::node::NodeId;

/// The frontier ordering key: `(f_cost, tie, sequence)`.
///
/// Lower `f_cost` first (IEEE total order), then lower `tie`, then older
/// `sequence`. `sequence` is unique per push, so the order is total and two
/// runs over the same inputs pop in the same order.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub tie: u64,
    pub sequence: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.tie.cmp(&other.tie))
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A heap entry. `BinaryHeap` is a max-heap, so the key is wrapped in
/// `Reverse` to pop the lowest key first.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Open set of `(f_cost, node)` candidates.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
    high_water: u64,
}

impl OpenSet {
    /// Create a new empty open set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a candidate. Duplicates of `node` already in the heap are kept.
    pub fn push(&mut self, f_cost: f64, tie: u64, node: NodeId) {
        let key = FrontierKey {
            f_cost,
            tie,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the lowest-key entry.
    pub fn pop(&mut self) -> Option<(FrontierKey, NodeId)> {
        self.heap.pop().map(|e| (e.key.0, e.node))
    }

    /// Key of the entry [`OpenSet::pop`] would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    /// Number of entries, stale duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the heap has reached since creation or the last clear.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Drop every entry and reset the sequence counter and high-water mark.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
        self.high_water = 0;
    }
}

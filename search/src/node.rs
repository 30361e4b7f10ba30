//! Node identifiers and per-node search records.

/// Opaque identifier of a graph vertex.
///
/// Every value, `0` included, is an ordinary id. Absence is always expressed
/// with `Option<NodeId>`, never with a reserved value.
pub type NodeId = u32;

/// Per-node state kept by the engine for every node ever relaxed.
///
/// The record table holds at most one record per [`NodeId`]. Absence from the
/// table means "never relaxed"; a present record with `g_cost == 0.0` is a
/// legitimately free path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    /// Best known cost from the start node.
    pub g_cost: f64,
    /// Set once the node has been popped as current.
    pub closed: bool,
    /// Back-pointer on the best known path (`None` for the start node).
    pub parent: Option<NodeId>,
}

impl NodeRecord {
    /// Record for the start node: zero cost, open, no parent.
    #[must_use]
    pub fn start() -> Self {
        Self {
            g_cost: 0.0,
            closed: false,
            parent: None,
        }
    }

    /// Record for a node reached from `parent` at cost `g_cost`.
    #[must_use]
    pub fn reached(g_cost: f64, parent: NodeId, closed: bool) -> Self {
        Self {
            g_cost,
            closed,
            parent: Some(parent),
        }
    }
}

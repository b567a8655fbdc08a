//! Arena node types.

use serde::Serialize;

use crate::record::NormalizedRecord;

/// Index of a node inside a [`CommentTree`](super::CommentTree) arena.
///
/// A plain position into the arena's node store, never reused within a
/// build. Ids from one tree must not be used against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of this node in the arena store.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A comment wrapped with its tree position and computed aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    /// The normalized source record.
    pub record: NormalizedRecord,

    /// 0 for roots, parent depth + 1 otherwise. Valid after assembly.
    pub depth: u32,

    /// Back-reference for traversal only, never an ownership edge.
    pub parent: Option<NodeId>,

    /// Direct replies, in original record order.
    pub children: Vec<NodeId>,

    /// Nodes in this subtree excluding the node itself. Valid after
    /// aggregation.
    pub total_descendants: u64,

    /// This node's like count plus all descendants'. Valid after
    /// aggregation.
    pub total_likes: u64,
}

impl CommentNode {
    pub(crate) fn new(record: NormalizedRecord) -> Self {
        Self {
            record,
            depth: 0,
            parent: None,
            children: Vec::new(),
            total_descendants: 0,
            total_likes: 0,
        }
    }

    /// Whether this node is a root of the forest.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

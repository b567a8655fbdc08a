//! Derived read views over an assembled tree.
//!
//! Lookups are served from the registry, ranking views scan the arena, and
//! [`CommentTree::summary`] produces the corpus-wide statistics embedded in
//! the export envelope. All views are read-only; the tree does not change
//! once queries begin.

use serde::Serialize;

use crate::tree::{CommentNode, CommentTree, NodeId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default number of entries served by the hot-comments view.
pub const DEFAULT_HOT_COMMENTS: usize = 10;

/// Default number of entries served by the deepest-threads view.
pub const DEFAULT_DEEPEST_THREADS: usize = 5;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Corpus-wide statistics for one assembled tree.
///
/// Reflects the assembled corpus, not a pruned view: like the per-node
/// aggregates, these numbers are not recomputed after pruning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSummary {
    /// Every node in the registry, roots included.
    pub total_nodes: u64,
    /// Number of roots in the forest.
    pub total_roots: u64,
    /// Deepest node depth anywhere in the corpus (0 for an empty tree).
    pub max_depth: u32,
    /// Mean number of direct replies per root (0.0 for an empty tree).
    pub avg_children_per_root: f64,
    /// Sum of like counts across all nodes.
    pub total_likes: u64,
    /// Mean like count per comment (0.0 for an empty tree).
    pub avg_likes_per_comment: f64,
}

// ---------------------------------------------------------------------------
// Query views
// ---------------------------------------------------------------------------

impl CommentTree {
    /// O(1) registry lookup; `None` when the id is unknown.
    pub fn find_by_id(&self, id: &str) -> Option<&CommentNode> {
        self.lookup(id).map(|node_id| self.node(node_id))
    }

    /// Every comment by `author_id`, in original record order.
    pub fn find_by_user(&self, author_id: &str) -> Vec<&CommentNode> {
        self.nodes()
            .iter()
            .filter(|node| node.record.author_id == author_id)
            .collect()
    }

    /// Global top-`n` comments by like count, descending.
    ///
    /// Ranks every node in the registry, not just roots. Ties keep original
    /// insertion order (the sort is stable).
    pub fn hot_comments(&self, n: usize) -> Vec<&CommentNode> {
        let mut ranked: Vec<&CommentNode> = self.nodes().iter().collect();
        ranked.sort_by(|a, b| b.record.like_count.cmp(&a.record.like_count));
        ranked.truncate(n);
        ranked
    }

    /// Top-`n` roots ranked by the deepest reply level reached in their
    /// subtree, descending. Ties keep original root order.
    pub fn deepest_threads(&self, n: usize) -> Vec<&CommentNode> {
        let mut ranked: Vec<(u32, NodeId)> = self
            .roots()
            .iter()
            .map(|&root| (self.thread_height(root), root))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(n);
        ranked
            .into_iter()
            .map(|(_, root)| self.node(root))
            .collect()
    }

    /// Corpus-wide statistics; all fields are zero-safe on the empty tree.
    pub fn summary(&self) -> TreeSummary {
        let total_nodes = self.len() as u64;
        let total_roots = self.roots().len() as u64;
        let max_depth = self.nodes().iter().map(|n| n.depth).max().unwrap_or(0);
        let direct_children: u64 = self
            .roots()
            .iter()
            .map(|&root| self.node(root).children.len() as u64)
            .sum();
        let total_likes: u64 = self.nodes().iter().map(|n| n.record.like_count).sum();

        TreeSummary {
            total_nodes,
            total_roots,
            max_depth,
            avg_children_per_root: if total_roots == 0 {
                0.0
            } else {
                direct_children as f64 / total_roots as f64
            },
            total_likes,
            avg_likes_per_comment: if total_nodes == 0 {
                0.0
            } else {
                total_likes as f64 / total_nodes as f64
            },
        }
    }

    /// Deepest reply level under `root`, in edges (0 for a leaf).
    fn thread_height(&self, root: NodeId) -> u32 {
        let mut height = 0;
        let mut stack = vec![(root, 0u32)];
        while let Some((id, level)) = stack.pop() {
            height = height.max(level);
            for &child in &self.node(id).children {
                stack.push((child, level + 1));
            }
        }
        height
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

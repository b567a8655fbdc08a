//! Canonical nested output for the rendering consumer.
//!
//! [`TreeExport`] wraps the forest in a metadata envelope (generation
//! timestamp plus corpus summary) and serializes each visible node with its
//! children inline, matching the shape the renderer walks.

use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;
use crate::query::TreeSummary;
use crate::tree::CommentTree;
use crate::types::{CommentId, EpochSecs, Timestamp, UserId};

/// One node of the serialized forest; `children` repeat the same shape.
#[derive(Debug, Clone, Serialize)]
pub struct SerializedNode {
    pub id: CommentId,
    pub content: String,
    pub created_at: Option<EpochSecs>,
    pub like_count: u64,
    pub reply_count: u64,
    pub author_id: UserId,
    pub author_name: Option<String>,
    pub depth: u32,
    pub total_descendants: u64,
    pub total_likes: u64,
    pub children: Vec<SerializedNode>,
}

/// Envelope metadata: when the export was generated and the corpus summary.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub generated_at: Timestamp,
    pub statistics: TreeSummary,
}

/// The full serialized forest handed to the rendering consumer.
#[derive(Debug, Clone, Serialize)]
pub struct TreeExport {
    pub metadata: ExportMetadata,
    pub nodes: Vec<SerializedNode>,
}

impl TreeExport {
    /// Serialize an assembled (and optionally pruned) tree.
    ///
    /// Only nodes reachable from the roots appear in `nodes`; children
    /// detached by pruning are absent even though the summary statistics
    /// still describe the full corpus.
    pub fn from_tree(tree: &CommentTree) -> Self {
        Self {
            metadata: ExportMetadata {
                generated_at: Utc::now(),
                statistics: tree.summary(),
            },
            nodes: serialize_forest(tree),
        }
    }

    /// Compact JSON for machine consumers.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON for files meant to be read by humans.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the nested node representation bottom-up.
///
/// Walks a preorder work list in reverse so every child is materialized
/// before its parent takes ownership of it; deep threads cannot overflow
/// the call stack.
fn serialize_forest(tree: &CommentTree) -> Vec<SerializedNode> {
    let mut slots: Vec<Option<SerializedNode>> = (0..tree.len()).map(|_| None).collect();
    let order = tree.preorder();

    for &id in order.iter().rev() {
        let node = tree.node(id);
        let children: Vec<SerializedNode> = node
            .children
            .iter()
            .filter_map(|child| slots[child.index()].take())
            .collect();
        slots[id.index()] = Some(SerializedNode {
            id: node.record.id.clone(),
            content: node.record.content.clone(),
            created_at: node.record.created_at,
            like_count: node.record.like_count,
            reply_count: node.record.reply_count,
            author_id: node.record.author_id.clone(),
            author_name: node.record.author_name.clone(),
            depth: node.depth,
            total_descendants: node.total_descendants,
            total_likes: node.total_likes,
            children,
        });
    }

    tree.roots()
        .iter()
        .filter_map(|root| slots[root.index()].take())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Staged tree construction.

use serde::Serialize;

use arbor_core::record::{self, NormalizedBatch, RawRecord, Rejection};
use arbor_core::{prune, stats, CommentTree, TreeExport};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Display depth cap used by interactive frontends.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Options for a single tree build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
    /// Maximum visible depth; `0` disables pruning entirely.
    pub max_depth: u32,
}

impl BuildOptions {
    /// Build without a depth cap.
    pub fn unlimited() -> Self {
        Self { max_depth: 0 }
    }

    /// Build with the frontend display cap of [`DEFAULT_MAX_DEPTH`].
    pub fn display_default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::unlimited()
    }
}

// ---------------------------------------------------------------------------
// Build output
// ---------------------------------------------------------------------------

/// Diagnostics for one completed build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Number of raw records handed to the pipeline.
    pub input_records: usize,
    /// Records that survived normalization.
    pub accepted: usize,
    /// Records dropped by normalization.
    pub rejected: u64,
    /// Sampled rejections (input index + reason).
    pub rejection_samples: Vec<Rejection>,
    /// Roots in the assembled forest.
    pub roots: usize,
    /// The depth cap that was applied; `0` means none.
    pub depth_cap: u32,
}

/// An assembled tree together with its build diagnostics.
#[derive(Debug, Clone)]
pub struct TreeBuild {
    pub tree: CommentTree,
    pub report: BuildReport,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full pipeline: Normalize → Assemble → Aggregate → (Prune).
///
/// Never fails: per-record anomalies degrade to rejection counts and an
/// empty input yields a valid zero-root tree. Each call works on its own
/// snapshot; builds share no state.
pub fn build(records: &[RawRecord], options: &BuildOptions) -> TreeBuild {
    let input_records = records.len();
    tracing::info!(input_records, "Building comment tree");

    let NormalizedBatch {
        records: cleaned,
        rejected,
        rejection_samples,
    } = record::normalize(records);
    let accepted = cleaned.len();
    tracing::info!(accepted, rejected, "Normalized records");

    let mut tree = CommentTree::assemble(cleaned);
    let roots = tree.roots().len();
    tracing::info!(roots, "Assembled forest");

    stats::aggregate(&mut tree);

    if options.max_depth > 0 {
        prune::prune_depth(&mut tree, options.max_depth);
        tracing::info!(max_depth = options.max_depth, "Pruned display depth");
    }

    let summary = tree.summary();
    tracing::info!(
        total_nodes = summary.total_nodes,
        total_roots = summary.total_roots,
        max_depth = summary.max_depth,
        total_likes = summary.total_likes,
        "Comment tree ready"
    );

    TreeBuild {
        tree,
        report: BuildReport {
            input_records,
            accepted,
            rejected,
            rejection_samples,
            roots,
            depth_cap: options.max_depth,
        },
    }
}

/// Serialize a finished tree into the rendering envelope.
pub fn export(tree: &CommentTree) -> TreeExport {
    TreeExport::from_tree(tree)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Arbor core: comment-tree construction and aggregation.
//!
//! Turns a flat batch of comment records into a rooted forest and serves
//! derived views over it. Building blocks, in pipeline order:
//!
//! - [`record`] — raw-record validation and coercion ([`record::normalize`]).
//! - [`tree`] — arena-backed forest assembly ([`tree::CommentTree`]).
//! - [`stats`] — post-order subtree aggregates ([`stats::aggregate`]).
//! - [`prune`] — depth-limited view pruning ([`prune::prune_depth`]).
//! - [`query`] — lookups, hot comments, deepest threads, summary stats.
//! - [`engagement`] — rendering-contract engagement tiers.
//! - [`serialize`] — nested export envelope ([`serialize::TreeExport`]).
//!
//! The engine performs no I/O: a record source supplies
//! [`RawRecord`](record::RawRecord)s and a rendering consumer receives the
//! [`TreeExport`](serialize::TreeExport). Builds are function-scoped — each
//! one works on its own snapshot and shares no state with other builds.

pub mod engagement;
pub mod error;
pub mod prune;
pub mod query;
pub mod record;
pub mod serialize;
pub mod stats;
pub mod tree;
pub mod types;

pub use engagement::EngagementTier;
pub use error::CoreError;
pub use query::TreeSummary;
pub use record::{
    normalize, NormalizedBatch, NormalizedRecord, ParentRef, RawRecord, RejectReason, Rejection,
};
pub use serialize::TreeExport;
pub use tree::{CommentNode, CommentTree, NodeId};

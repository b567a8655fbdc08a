//! Error taxonomy for the comment-tree engine.
//!
//! Per-record anomalies are not errors: the normalizer drops malformed
//! records with a counted [`reason`](crate::record::RejectReason), an empty
//! input builds a valid zero-root tree, and lookup misses return `None`.
//! `CoreError` covers the few conditions that are genuine caller-facing
//! failures.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

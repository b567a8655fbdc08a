//! Engagement tiers shared with the rendering consumer.
//!
//! The renderer encodes engagement visually using fixed like-count
//! thresholds; publishing them here keeps both sides of the contract on the
//! same numbers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tree::CommentNode;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Like count above which a comment renders as "hot".
pub const HOT_LIKES_THRESHOLD: u64 = 50;

/// Like count above which a comment renders as "high engagement".
pub const HIGH_ENGAGEMENT_LIKES_THRESHOLD: u64 = 20;

// ---------------------------------------------------------------------------
// Tier enum
// ---------------------------------------------------------------------------

/// Visual engagement tier for a comment.
///
/// Like-count tiers take precedence; below both thresholds comments tier by
/// position (top-level vs nested).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTier {
    /// More than [`HOT_LIKES_THRESHOLD`] likes.
    Hot,
    /// More than [`HIGH_ENGAGEMENT_LIKES_THRESHOLD`] likes.
    High,
    /// Below both thresholds, at depth 0.
    TopLevel,
    /// Below both thresholds, nested under another comment.
    Nested,
}

impl EngagementTier {
    /// Derive the tier from a like count and node depth.
    pub fn from_metrics(like_count: u64, depth: u32) -> Self {
        if like_count > HOT_LIKES_THRESHOLD {
            Self::Hot
        } else if like_count > HIGH_ENGAGEMENT_LIKES_THRESHOLD {
            Self::High
        } else if depth == 0 {
            Self::TopLevel
        } else {
            Self::Nested
        }
    }

    /// Tier for an assembled node.
    pub fn for_node(node: &CommentNode) -> Self {
        Self::from_metrics(node.record.like_count, node.depth)
    }

    /// String representation for display and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::High => "high",
            Self::TopLevel => "top_level",
            Self::Nested => "nested",
        }
    }

    /// Parse a stored tier string back into an `EngagementTier`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "hot" => Ok(Self::Hot),
            "high" => Ok(Self::High),
            "top_level" => Ok(Self::TopLevel),
            "nested" => Ok(Self::Nested),
            other => Err(CoreError::Validation(format!(
                "Unknown engagement tier: '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for EngagementTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

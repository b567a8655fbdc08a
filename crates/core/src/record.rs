//! Raw comment records and the normalization stage.
//!
//! Record sources hand over rows of uneven quality (CSV cells, database
//! columns, scraped JSON), so every [`RawRecord`] field is optional and the
//! id/count/timestamp fields are loose [`serde_json::Value`]s that may be
//! strings or numbers. [`normalize`] coerces a batch into
//! [`NormalizedRecord`]s, dropping unusable rows with a counted reason
//! instead of failing the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{CommentId, EpochSecs, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Parent-field value conventionally meaning "this comment has no parent".
pub const ROOT_PARENT_SENTINEL: &str = "0";

/// Maximum number of per-record rejections kept as samples in a batch.
pub const MAX_REJECTION_SAMPLES: usize = 10;

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// One comment row as delivered by a record source.
///
/// Constructed via [`RawRecord::new`] and enriched with the builder methods
/// when assembled in code; deserialized as-is when a loader hands over JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    /// Platform comment identifier; string or number.
    #[serde(default)]
    pub id: Option<Value>,

    /// Identifier of the comment this one replies to; string or number.
    /// Absent, null, empty, or [`ROOT_PARENT_SENTINEL`] means top-level.
    #[serde(default)]
    pub parent_id: Option<Value>,

    /// Comment body text.
    #[serde(default)]
    pub content: Option<String>,

    /// Creation time as epoch seconds; string or number.
    #[serde(default)]
    pub created_at: Option<Value>,

    /// Like count; string or number.
    #[serde(default)]
    pub like_count: Option<Value>,

    /// Platform-reported direct reply count; string or number.
    #[serde(default)]
    pub reply_count: Option<Value>,

    /// Author identifier; string or number.
    #[serde(default)]
    pub author_id: Option<Value>,

    /// Author display name.
    #[serde(default)]
    pub author_name: Option<String>,
}

impl RawRecord {
    /// Create a top-level record with the required fields.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Set the parent comment id.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(Value::String(parent_id.into()));
        self
    }

    /// Set the like count.
    pub fn with_likes(mut self, like_count: u64) -> Self {
        self.like_count = Some(Value::from(like_count));
        self
    }

    /// Set the platform-reported reply count.
    pub fn with_replies(mut self, reply_count: u64) -> Self {
        self.reply_count = Some(Value::from(reply_count));
        self
    }

    /// Set the creation time (epoch seconds).
    pub fn with_created_at(mut self, created_at: EpochSecs) -> Self {
        self.created_at = Some(Value::from(created_at));
        self
    }

    /// Set the author id and display name.
    pub fn with_author(
        mut self,
        author_id: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        self.author_id = Some(Value::String(author_id.into()));
        self.author_name = Some(author_name.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Canonical records
// ---------------------------------------------------------------------------

/// Resolved parent reference: the explicit root marker or a real comment id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRef {
    /// No parent: the field was absent, null, empty, or the `"0"` sentinel.
    Root,
    /// Reply to the given comment id.
    Id(CommentId),
}

/// A validated, coerced comment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    /// Non-empty comment identifier.
    pub id: CommentId,
    /// Parent reference after sentinel resolution.
    pub parent: ParentRef,
    /// Non-empty, trimmed body text.
    pub content: String,
    /// Creation time, when it could be coerced.
    pub created_at: Option<EpochSecs>,
    /// Like count; uncoercible values default to 0.
    pub like_count: u64,
    /// Platform-reported reply count; uncoercible values default to 0.
    pub reply_count: u64,
    /// Author identifier; empty when the source omitted it.
    pub author_id: UserId,
    /// Author display name, when present and non-blank.
    pub author_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why a raw record was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The record carried no usable identifier.
    MissingId,
    /// Content was missing, empty, or whitespace-only.
    EmptyContent,
}

impl RejectReason {
    /// String representation for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingId => "missing_id",
            Self::EmptyContent => "empty_content",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dropped record: its position in the input and the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Index of the record in the input batch.
    pub index: usize,
    pub reason: RejectReason,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Result of normalizing one input batch.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedBatch {
    /// Accepted records, in input order.
    pub records: Vec<NormalizedRecord>,
    /// Total number of dropped records.
    pub rejected: u64,
    /// The first [`MAX_REJECTION_SAMPLES`] rejections, for diagnostics.
    pub rejection_samples: Vec<Rejection>,
}

/// Validate and coerce a batch of raw records into canonical form.
///
/// Rejected records never fail the batch: they are dropped, counted, and
/// sampled. An empty input yields an empty batch.
pub fn normalize(records: &[RawRecord]) -> NormalizedBatch {
    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = 0u64;
    let mut rejection_samples = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        match normalize_record(raw) {
            Ok(record) => accepted.push(record),
            Err(reason) => {
                rejected += 1;
                if rejection_samples.len() < MAX_REJECTION_SAMPLES {
                    rejection_samples.push(Rejection { index, reason });
                }
            }
        }
    }

    NormalizedBatch {
        records: accepted,
        rejected,
        rejection_samples,
    }
}

/// Normalize a single record, returning the rejection reason on failure.
fn normalize_record(raw: &RawRecord) -> Result<NormalizedRecord, RejectReason> {
    let id = raw
        .id
        .as_ref()
        .and_then(coerce_id)
        .ok_or(RejectReason::MissingId)?;

    let content = raw.content.as_deref().unwrap_or("").trim();
    if content.is_empty() {
        return Err(RejectReason::EmptyContent);
    }

    Ok(NormalizedRecord {
        id,
        parent: resolve_parent(raw.parent_id.as_ref()),
        content: content.to_string(),
        created_at: coerce_timestamp(raw.created_at.as_ref()),
        like_count: coerce_count(raw.like_count.as_ref()),
        reply_count: coerce_count(raw.reply_count.as_ref()),
        author_id: raw
            .author_id
            .as_ref()
            .and_then(coerce_id)
            .unwrap_or_default(),
        author_name: raw
            .author_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    })
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Coerce a loose id value into the string identity space.
///
/// Numbers render as their decimal form, strings are trimmed; anything else,
/// or an empty result, yields `None`.
fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a loose non-negative count; anything unparseable defaults to 0.
fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Coerce a loose epoch-seconds value; unparseable timestamps stay unset.
fn coerce_timestamp(value: Option<&Value>) -> Option<EpochSecs> {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Map a loose parent value to its [`ParentRef`].
fn resolve_parent(value: Option<&Value>) -> ParentRef {
    let id = match value {
        Some(v) if !v.is_null() => coerce_id(v),
        _ => None,
    };
    match id {
        Some(id) if id != ROOT_PARENT_SENTINEL => ParentRef::Id(id),
        _ => ParentRef::Root,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- parent resolution ---------------------------------------------------

    #[test]
    fn missing_parent_maps_to_root() {
        let batch = normalize(&[RawRecord::new("a", "hello")]);
        assert_eq!(batch.records[0].parent, ParentRef::Root);
    }

    #[test]
    fn sentinel_parent_maps_to_root() {
        let batch = normalize(&[RawRecord::new("a", "hello").with_parent("0")]);
        assert_eq!(batch.records[0].parent, ParentRef::Root);
    }

    #[test]
    fn empty_parent_maps_to_root() {
        let batch = normalize(&[RawRecord::new("a", "hello").with_parent("  ")]);
        assert_eq!(batch.records[0].parent, ParentRef::Root);
    }

    #[test]
    fn null_parent_maps_to_root() {
        let mut raw = RawRecord::new("a", "hello");
        raw.parent_id = Some(Value::Null);
        let batch = normalize(&[raw]);
        assert_eq!(batch.records[0].parent, ParentRef::Root);
    }

    #[test]
    fn real_parent_is_kept() {
        let batch = normalize(&[RawRecord::new("b", "reply").with_parent("a")]);
        assert_eq!(batch.records[0].parent, ParentRef::Id("a".to_string()));
    }

    #[test]
    fn numeric_sentinel_parent_maps_to_root() {
        let mut raw = RawRecord::new("a", "hello");
        raw.parent_id = Some(json!(0));
        let batch = normalize(&[raw]);
        assert_eq!(batch.records[0].parent, ParentRef::Root);
    }

    // -- identity coercion ---------------------------------------------------

    #[test]
    fn numeric_id_coerces_to_string() {
        let mut raw = RawRecord::new("x", "hello");
        raw.id = Some(json!(7398217501i64));
        let batch = normalize(&[raw]);
        assert_eq!(batch.records[0].id, "7398217501");
    }

    #[test]
    fn numeric_parent_coerces_into_same_space() {
        let mut raw = RawRecord::new("b", "reply");
        raw.parent_id = Some(json!(42));
        let batch = normalize(&[raw]);
        assert_eq!(batch.records[0].parent, ParentRef::Id("42".to_string()));
    }

    #[test]
    fn id_is_trimmed() {
        let batch = normalize(&[RawRecord::new("  a  ", "hello")]);
        assert_eq!(batch.records[0].id, "a");
    }

    // -- rejections ----------------------------------------------------------

    #[test]
    fn missing_id_is_rejected() {
        let mut raw = RawRecord::new("", "hello");
        raw.id = None;
        let batch = normalize(&[raw]);
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected, 1);
        assert_eq!(batch.rejection_samples[0].reason, RejectReason::MissingId);
    }

    #[test]
    fn blank_id_is_rejected() {
        let batch = normalize(&[RawRecord::new("   ", "hello")]);
        assert_eq!(batch.rejected, 1);
        assert_eq!(batch.rejection_samples[0].reason, RejectReason::MissingId);
    }

    #[test]
    fn whitespace_content_is_rejected() {
        let batch = normalize(&[RawRecord::new("a", "   \t  ")]);
        assert_eq!(batch.rejected, 1);
        assert_eq!(
            batch.rejection_samples[0].reason,
            RejectReason::EmptyContent
        );
    }

    #[test]
    fn missing_content_is_rejected() {
        let mut raw = RawRecord::new("a", "");
        raw.content = None;
        let batch = normalize(&[raw]);
        assert_eq!(batch.rejected, 1);
        assert_eq!(
            batch.rejection_samples[0].reason,
            RejectReason::EmptyContent
        );
    }

    #[test]
    fn rejections_never_fail_the_batch() {
        let records = vec![
            RawRecord::new("a", "keep me"),
            RawRecord::new("", "dropped"),
            RawRecord::new("c", "also kept"),
        ];
        let batch = normalize(&records);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.rejected, 1);
        assert_eq!(batch.rejection_samples[0].index, 1);
    }

    #[test]
    fn rejection_samples_are_capped() {
        let records: Vec<RawRecord> = (0..MAX_REJECTION_SAMPLES + 5)
            .map(|_| RawRecord::new("x", ""))
            .collect();
        let batch = normalize(&records);
        assert_eq!(batch.rejected, (MAX_REJECTION_SAMPLES + 5) as u64);
        assert_eq!(batch.rejection_samples.len(), MAX_REJECTION_SAMPLES);
    }

    #[test]
    fn empty_input_yields_empty_batch() {
        let batch = normalize(&[]);
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected, 0);
        assert!(batch.rejection_samples.is_empty());
    }

    // -- numeric coercion ----------------------------------------------------

    #[test]
    fn numeric_string_counts_parse() {
        let mut raw = RawRecord::new("a", "hello");
        raw.like_count = Some(json!("12"));
        raw.reply_count = Some(json!(" 3 "));
        let batch = normalize(&[raw]);
        let record = &batch.records[0];
        assert_eq!(record.like_count, 12);
        assert_eq!(record.reply_count, 3);
    }

    #[test]
    fn garbage_counts_default_to_zero() {
        let mut raw = RawRecord::new("a", "hello");
        raw.like_count = Some(json!("lots"));
        raw.reply_count = Some(json!(-4));
        let batch = normalize(&[raw]);
        let record = &batch.records[0];
        assert_eq!(record.like_count, 0);
        assert_eq!(record.reply_count, 0);
    }

    #[test]
    fn float_count_truncates() {
        let mut raw = RawRecord::new("a", "hello");
        raw.like_count = Some(json!(5.0));
        let batch = normalize(&[raw]);
        let record = &batch.records[0];
        assert_eq!(record.like_count, 5);
    }

    #[test]
    fn unparseable_timestamp_stays_unset() {
        let mut raw = RawRecord::new("a", "hello");
        raw.created_at = Some(json!("yesterday"));
        let batch = normalize(&[raw]);
        let record = &batch.records[0];
        assert_eq!(record.created_at, None);
        // The record itself survives.
        assert_eq!(record.id, "a");
    }

    #[test]
    fn numeric_timestamp_is_kept() {
        let batch = normalize(&[RawRecord::new("a", "hello").with_created_at(1_700_000_000)]);
        let record = &batch.records[0];
        assert_eq!(record.created_at, Some(1_700_000_000));
    }

    // -- author fields -------------------------------------------------------

    #[test]
    fn author_fields_are_carried() {
        let batch = normalize(&[RawRecord::new("a", "hello").with_author("u1", "Alice")]);
        let record = &batch.records[0];
        assert_eq!(record.author_id, "u1");
        assert_eq!(record.author_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn blank_author_name_becomes_none() {
        let mut raw = RawRecord::new("a", "hello");
        raw.author_name = Some("   ".to_string());
        let batch = normalize(&[raw]);
        let record = &batch.records[0];
        assert_eq!(record.author_name, None);
    }

    // -- deserialization -----------------------------------------------------

    #[test]
    fn raw_record_deserializes_from_loose_json() {
        let raw: RawRecord = serde_json::from_value(json!({
            "id": 101,
            "parent_id": "0",
            "content": "first!",
            "like_count": "7",
        }))
        .expect("deserialization should succeed");
        let batch = normalize(&[raw]);
        let record = &batch.records[0];
        assert_eq!(record.id, "101");
        assert_eq!(record.parent, ParentRef::Root);
        assert_eq!(record.like_count, 7);
    }
}

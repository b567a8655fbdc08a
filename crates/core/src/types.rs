//! Shared identifier and timestamp aliases.

/// Comment identifiers are platform-supplied opaque strings.
pub type CommentId = String;

/// Author identifiers share the same string identity space as comment ids.
pub type UserId = String;

/// Raw comment creation times arrive as epoch seconds.
pub type EpochSecs = i64;

/// All wall-clock timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

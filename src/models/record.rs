//! The persisted mention record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single piece of persisted state: when the topic was last confirmed
/// mentioned.
///
/// `None` means the topic has never been recorded. The record is only ever
/// mutated by an explicit confirmed reset; keyword hits leave it untouched.
/// Serializes as `{"last_mention": "<RFC 3339 instant>"}`, which is also the
/// on-disk layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Instant of the last confirmed mention, if any.
    #[serde(default)]
    pub last_mention: Option<DateTime<Utc>>,
}

impl MentionRecord {
    /// Creates an absent record (topic never recorded).
    #[must_use]
    pub const fn absent() -> Self {
        Self { last_mention: None }
    }

    /// Creates a record with the given last-mention instant.
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self {
            last_mention: Some(instant),
        }
    }

    /// Returns `true` when the topic has never been recorded.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.last_mention.is_none()
    }
}

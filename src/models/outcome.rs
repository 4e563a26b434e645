//! Decision outcomes produced by the mention policy.

use chrono::{DateTime, Utc};

/// Answer to a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReport {
    /// The topic has never been confirmed mentioned.
    NeverRecorded,
    /// The topic was last confirmed mentioned `days` whole days ago.
    Recorded {
        /// Whole days elapsed since the last confirmed mention.
        days: i64,
        /// Instant of the last confirmed mention.
        last_mention: DateTime<Utc>,
    },
}

/// Outcome of evaluating a keyword hit against the cooldown window.
///
/// A `Notice` is non-committing: the stored record is untouched and an
/// explicit reset command is required to move the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The hit falls inside the cooldown window; nothing is reported.
    Suppressed,
    /// The hit is reportable.
    Notice {
        /// The literal span matched in the inbound text, original casing.
        matched_span: String,
    },
}

impl TriggerOutcome {
    /// Returns `true` for a suppressed outcome.
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

/// Summary of a confirmed reset, for display.
///
/// `days_was` and `previous` are `None` together when the topic had never
/// been recorded before this reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSummary {
    /// The newly recorded mention instant.
    pub new_mention: DateTime<Utc>,
    /// Whole days the topic had survived before this reset.
    pub days_was: Option<i64>,
    /// The previously recorded instant.
    pub previous: Option<DateTime<Utc>>,
}

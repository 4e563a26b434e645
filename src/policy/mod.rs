//! Cooldown and day-count decisions.
//!
//! Pure decision layer over the mention record. Nothing here mutates or
//! persists state: `evaluate_trigger` and `evaluate_query` only read, and
//! `confirm_reset` returns the record the caller must persist. There is no
//! pending-trigger state anywhere; every keyword hit is evaluated fresh
//! against the stored timestamp.

// Allow unused_self for methods kept for API consistency.
#![allow(clippy::unused_self)]

use crate::models::{MentionRecord, ResetSummary, StatusReport, TriggerOutcome};
use chrono::{DateTime, Duration, Utc};

/// Decision layer: cooldown gating, day counts, reset summaries.
#[derive(Debug, Clone)]
pub struct MentionPolicy {
    /// Cooldown applied to keyword hits after a recorded mention.
    cooldown: Duration,
}

impl MentionPolicy {
    /// Creates a policy with the given cooldown window.
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    /// Returns the cooldown window.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Returns `true` when strictly less than the cooldown window has
    /// elapsed since `since`. Exactly the window counts as elapsed.
    #[must_use]
    pub fn within_cooldown(&self, since: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(since) < self.cooldown
    }

    /// Answers a status query against the current record.
    ///
    /// Day counts truncate: three days and twenty-three hours reports as
    /// three days.
    #[must_use]
    pub fn evaluate_query(&self, record: MentionRecord, now: DateTime<Utc>) -> StatusReport {
        match record.last_mention {
            None => StatusReport::NeverRecorded,
            Some(last) => StatusReport::Recorded {
                days: whole_days_between(last, now),
                last_mention: last,
            },
        }
    }

    /// Evaluates a keyword hit against the cooldown window.
    ///
    /// Suppressed only when a recorded mention exists and strictly less than
    /// the window has elapsed; a hit exactly at the window boundary is
    /// reported. Never mutates stored state.
    #[must_use]
    pub fn evaluate_trigger(
        &self,
        record: MentionRecord,
        matched_span: &str,
        now: DateTime<Utc>,
    ) -> TriggerOutcome {
        match record.last_mention {
            Some(last) if self.within_cooldown(last, now) => TriggerOutcome::Suppressed,
            _ => TriggerOutcome::Notice {
                matched_span: matched_span.to_string(),
            },
        }
    }

    /// Confirms a reset, always honored regardless of cooldown.
    ///
    /// Returns the new record (last mention set to `now`) and a display
    /// summary of what was overwritten. The caller is responsible for
    /// persisting the new record; a failed save must not be reported as a
    /// completed reset.
    #[must_use]
    pub fn confirm_reset(
        &self,
        record: MentionRecord,
        now: DateTime<Utc>,
    ) -> (MentionRecord, ResetSummary) {
        let previous = record.last_mention;
        let summary = ResetSummary {
            new_mention: now,
            days_was: previous.map(|prev| whole_days_between(prev, now)),
            previous,
        };
        (MentionRecord::at(now), summary)
    }
}

/// Whole days between two instants, truncating toward zero.
fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from).num_hours() / 24
}

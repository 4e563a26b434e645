//! Mention tracking orchestration.
//!
//! Ties the matcher, the policy, and the record store together. Every
//! operation takes the state lock once and holds it across the whole
//! read-decide-write sequence, so concurrent events can never act on a
//! stale record. A reported notice opens the cooldown window for follow-up
//! hits without moving the stored record; that spacing is held in memory
//! only and a restarted process starts clean.

use crate::Result;
use crate::config::TrackerConfig;
use crate::matcher::KeywordMatcher;
use crate::models::{InboundEvent, OutboundReply, ResetSummary, StatusReport, TriggerOutcome};
use crate::policy::MentionPolicy;
use crate::rendering;
use crate::storage::{FileRecordStore, RecordStore};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use tracing::instrument;

/// Mutable tracker state, guarded as one unit.
struct TrackerState<S> {
    /// Record store.
    store: S,
    /// When the last notice was issued, if any. Never persisted.
    last_notice: Option<DateTime<Utc>>,
}

/// Orchestrates mention detection, cooldown gating, and persistence.
pub struct TrackerService<S: RecordStore> {
    /// Topic label used in replies.
    topic: String,
    /// Compiled keyword matcher.
    matcher: KeywordMatcher,
    /// Cooldown policy.
    policy: MentionPolicy,
    /// Guarded state, locked across each read-decide-write sequence.
    state: Mutex<TrackerState<S>>,
}

impl TrackerService<FileRecordStore> {
    /// Builds the production service from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the configured keyword list
    /// compiles to nothing.
    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let matcher = KeywordMatcher::compile(&config.keywords)?;
        Ok(Self::new(
            config.topic.clone(),
            matcher,
            MentionPolicy::new(config.cooldown()),
            FileRecordStore::new(&config.state_file),
        ))
    }
}

impl<S: RecordStore> TrackerService<S> {
    /// Creates a service from its parts.
    pub fn new(
        topic: impl Into<String>,
        matcher: KeywordMatcher,
        policy: MentionPolicy,
        store: S,
    ) -> Self {
        Self {
            topic: topic.into(),
            matcher,
            policy,
            state: Mutex::new(TrackerState {
                store,
                last_notice: None,
            }),
        }
    }

    /// Returns the topic label.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns `true` when a recorded mention exists in the store.
    pub fn is_recorded(&self) -> bool {
        self.lock_state().store.is_recorded()
    }

    /// Handles one feed event, producing zero or one reply.
    ///
    /// A suppressed keyword hit and a message without any keyword both
    /// produce no reply. A reset whose save fails returns the error and no
    /// confirmation is produced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] when persisting a confirmed reset
    /// fails.
    #[instrument(skip(self, event), fields(kind = event.kind(), chat = %event.chat()))]
    pub fn handle_event(
        &self,
        event: &InboundEvent,
        now: DateTime<Utc>,
    ) -> Result<Option<OutboundReply>> {
        metrics::counter!("feed_events_total", "kind" => event.kind()).increment(1);

        match event {
            InboundEvent::Message { chat, text } => Ok(self
                .check_message(text, now)
                .map(|reply| OutboundReply::new(*chat, reply))),
            InboundEvent::Status { chat } => {
                let report = self.status(now);
                Ok(Some(OutboundReply::new(
                    *chat,
                    rendering::render_status(&self.topic, report),
                )))
            },
            InboundEvent::Reset { chat } => {
                let summary = self.reset(now)?;
                Ok(Some(OutboundReply::new(
                    *chat,
                    rendering::render_reset(&self.topic, summary),
                )))
            },
        }
    }

    /// Classifies a message and evaluates any hit against the cooldown.
    ///
    /// Returns `None` when no keyword is present at all. The window is
    /// opened by the stored record and by the last issued notice alike, so
    /// follow-up hits right after a notice stay quiet; only an explicit
    /// reset moves the record.
    #[instrument(skip(self, text))]
    pub fn scan(&self, text: &str, now: DateTime<Utc>) -> Option<TriggerOutcome> {
        let matched_span = self.matcher.classify(text)?;

        let outcome = {
            let mut state = self.lock_state();
            let outcome = self.policy.evaluate_trigger(state.store.load(), matched_span, now);
            let spaced_by_notice = state
                .last_notice
                .is_some_and(|notice| self.policy.within_cooldown(notice, now));

            if outcome.is_suppressed() || spaced_by_notice {
                TriggerOutcome::Suppressed
            } else {
                state.last_notice = Some(now);
                outcome
            }
        };

        if outcome.is_suppressed() {
            metrics::counter!("mentions_total", "outcome" => "suppressed").increment(1);
            tracing::debug!(span = matched_span, "keyword hit suppressed inside cooldown");
        } else {
            metrics::counter!("mentions_total", "outcome" => "reported").increment(1);
            tracing::info!(span = matched_span, "keyword hit reported");
        }

        Some(outcome)
    }

    /// Evaluates one message and renders the reply text, if any.
    ///
    /// The one-shot form of the feed's message flow. A suppressed hit and a
    /// keyword-free message both yield `None`.
    pub fn check_message(&self, text: &str, now: DateTime<Utc>) -> Option<String> {
        self.scan(text, now).and_then(|outcome| match outcome {
            TriggerOutcome::Suppressed => None,
            TriggerOutcome::Notice { matched_span } => {
                Some(rendering::render_soft_trigger(&self.topic, &matched_span))
            },
        })
    }

    /// Answers a status query against the stored record.
    pub fn status(&self, now: DateTime<Utc>) -> StatusReport {
        let record = self.lock_state().store.load();
        self.policy.evaluate_query(record, now)
    }

    /// Confirms a reset and persists the new record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] when the new record cannot be
    /// written; the reset is then not committed.
    #[instrument(skip(self))]
    pub fn reset(&self, now: DateTime<Utc>) -> Result<ResetSummary> {
        let summary = {
            let state = self.lock_state();
            let (new_record, summary) = self.policy.confirm_reset(state.store.load(), now);
            state.store.save(new_record)?;
            summary
        };

        metrics::counter!("counter_resets_total").increment(1);
        tracing::info!(days_was = ?summary.days_was, "counter reset confirmed");
        Ok(summary)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TrackerState<S>> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

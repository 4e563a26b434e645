//! Data models for dayzero.
//!
//! This module contains the core data structures used throughout the system.

mod event;
mod outcome;
mod record;

pub use event::{ChatId, InboundEvent, OutboundReply};
pub use outcome::{ResetSummary, StatusReport, TriggerOutcome};
pub use record::MentionRecord;

//! # Dayzero
//!
//! Days-since-last-mention tracker for chat streams.
//!
//! Dayzero watches a stream of chat messages for mentions of a configured
//! topic and maintains a single persisted "last confirmed mention" timestamp.
//! A keyword hit never resets the counter by itself: it produces a soft
//! trigger notice, and only an explicit confirm command overwrites the
//! stored instant. A cooldown window keeps repeated hits from spamming the
//! chat with notices.
//!
//! ## Features
//!
//! - Boundary-aware keyword matching (Unicode word classes, per-keyword
//!   suffix policy, case-insensitive)
//! - Stateless cooldown: suppression is computed from the stored timestamp,
//!   never from timers
//! - Crash-safe persistence: one JSON file, written atomically
//! - Line-oriented JSON feed protocol over stdin/stdout for transport
//!   integration
//!
//! ## Example
//!
//! ```rust,ignore
//! use dayzero::{TrackerConfig, TrackerService};
//!
//! let config = TrackerConfig::load_default()?;
//! let service = TrackerService::from_config(&config)?;
//! let outcome = service.scan("who ate my apple?", chrono::Utc::now());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
// Current duplicates come from the platform-dirs and criterion stacks.
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod feed;
pub mod matcher;
pub mod models;
pub mod observability;
pub mod policy;
pub mod rendering;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::TrackerConfig;
pub use matcher::{KeywordMatcher, KeywordRule};
pub use models::{
    ChatId, InboundEvent, MentionRecord, OutboundReply, ResetSummary, StatusReport, TriggerOutcome,
};
pub use policy::MentionPolicy;
pub use services::TrackerService;
pub use storage::{FileRecordStore, RecordStore};

/// Error type for dayzero operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Config` | Empty keyword list, unreadable or malformed config file |
/// | `Storage` | Writing the record file fails (I/O, serialization) |
/// | `Feed` | Reading events from or writing replies to the feed fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration is invalid.
    ///
    /// Raised when:
    /// - The keyword list is empty after trimming blanks
    /// - The config file exists but cannot be read or parsed
    ///
    /// Fatal at startup; the matcher cannot be built from a bad keyword set.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A storage operation failed.
    ///
    /// Raised when:
    /// - The record file or its parent directory cannot be created
    /// - Writing, syncing, or renaming the temporary file fails
    ///
    /// Read failures are not represented here: a missing or corrupt record
    /// file reads back as "never recorded" with a logged warning.
    #[error("storage operation '{operation}' failed: {cause}")]
    Storage {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A feed I/O operation failed.
    ///
    /// Raised when:
    /// - Reading a line from the inbound stream fails
    /// - Writing a reply line to the outbound stream fails
    ///
    /// Malformed event lines are not errors; they are logged and skipped.
    #[error("feed operation '{operation}' failed: {cause}")]
    Feed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for dayzero operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("no keywords configured".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: no keywords configured"
        );

        let err = Error::Storage {
            operation: "save_record".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "storage operation 'save_record' failed: disk full"
        );

        let err = Error::Feed {
            operation: "write_reply".to_string(),
            cause: "broken pipe".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "feed operation 'write_reply' failed: broken pipe"
        );
    }
}

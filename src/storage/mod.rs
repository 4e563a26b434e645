//! Persistence for the mention record.
//!
//! The durable state is exactly one timestamp. [`RecordStore`] is the seam
//! between the decision logic and whatever holds that timestamp;
//! [`FileRecordStore`] is the production implementation over a small JSON
//! file with atomic writes.

mod file;

pub use file::FileRecordStore;

use crate::Result;
use crate::models::MentionRecord;

/// Backend for the durable mention record.
///
/// Loading never fails the caller: a missing or unreadable backing store
/// reads back as "never recorded" and the condition is logged. Saving is
/// fallible and must be durable: a crash mid-write may lose the new value
/// but must never leave a record that parses to something wrong.
pub trait RecordStore: Send + Sync {
    /// Loads the current record, substituting an absent record on any
    /// read or parse failure.
    fn load(&self) -> MentionRecord;

    /// Persists the record so an immediate reload observes the new value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] when the write cannot be completed.
    fn save(&self, record: MentionRecord) -> Result<()>;

    /// Returns `true` when a recorded mention is currently readable.
    fn is_recorded(&self) -> bool {
        !self.load().is_absent()
    }
}

//! File-backed record store.

use crate::models::MentionRecord;
use crate::storage::RecordStore;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores the mention record as a pretty-printed JSON file.
///
/// Writes go to a sibling temporary file which is synced and renamed over
/// the target, so a reader never observes a half-written record. A crash
/// between sync and rename leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    /// Path of the record file.
    path: PathBuf,
}

impl FileRecordStore {
    /// Creates a store backed by the given file path.
    ///
    /// The file does not need to exist; it is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the record file.
    fn read_record(&self) -> std::io::Result<serde_json::Result<MentionRecord>> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data))
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> MentionRecord {
        match self.read_record() {
            Ok(Ok(record)) => record,
            Ok(Err(parse_err)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %parse_err,
                    "record file is unreadable, treating topic as never recorded"
                );
                MentionRecord::absent()
            },
            Err(io_err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %io_err,
                    "record file missing or inaccessible, treating topic as never recorded"
                );
                MentionRecord::absent()
            },
        }
    }

    fn save(&self, record: MentionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Storage {
                    operation: "create_record_dir".to_string(),
                    cause: e.to_string(),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&record).map_err(|e| Error::Storage {
            operation: "encode_record".to_string(),
            cause: e.to_string(),
        })?;

        // Write-sync-rename so the previous record survives a crash mid-write.
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(|e| Error::Storage {
            operation: "create_record_temp".to_string(),
            cause: e.to_string(),
        })?;
        file.write_all(json.as_bytes()).map_err(|e| Error::Storage {
            operation: "write_record".to_string(),
            cause: e.to_string(),
        })?;
        file.sync_all().map_err(|e| Error::Storage {
            operation: "sync_record".to_string(),
            cause: e.to_string(),
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| Error::Storage {
            operation: "commit_record".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }
}

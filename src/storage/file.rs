//! File-based record storage for revise.
//!
//! The full record collection lives in one JSON file (`records.json` under
//! the revise home directory by default), serialized as an ordered array.
//! Writes are atomic via the temp file + rename pattern. A missing file
//! loads as an empty collection; a corrupt file is a serde error that
//! callers handle fail-open.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::records_path;
use crate::core::CardLearningRecord;
use crate::error::{ReviseError, Result};
use crate::storage::RecordStore;

/// File-based record storage.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    /// Path of the JSON file holding the collection.
    path: PathBuf,
}

impl FileRecordStore {
    /// Create a file store at the default location.
    ///
    /// Uses `~/.revise/records.json` or `$REVISE_HOME/records.json`.
    pub fn new() -> Result<Self> {
        let path = records_path().ok_or_else(|| {
            ReviseError::config("could not determine records path (no home directory)")
        })?;
        Self::with_path(path)
    }

    /// Create a file store at a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ReviseError::storage(parent, e))?;
            }
        }

        Ok(Self { path })
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "records.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Result<Vec<CardLearningRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| ReviseError::storage(&self.path, e))?;

        let records: Vec<CardLearningRecord> = serde_json::from_str(&content)?;

        Ok(records)
    }

    fn save(&self, records: &[CardLearningRecord]) -> Result<()> {
        let temp_path = self.temp_path();

        let json = serde_json::to_string_pretty(records)?;

        // Write to temp file, then rename (atomic on POSIX)
        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| ReviseError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| ReviseError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| ReviseError::storage(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| ReviseError::storage(&self.path, e))?;

        Ok(())
    }
}

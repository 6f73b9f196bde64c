//! In-memory record storage for testing.
//!
//! Thread-safe implementation of [`RecordStore`] backed by a
//! `RwLock<Vec<_>>`, keeping insertion order. Records are lost when the
//! store is dropped.

use std::sync::RwLock;

use crate::core::CardLearningRecord;
use crate::error::Result;
use crate::storage::RecordStore;

/// In-memory record store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<CardLearningRecord>>,
}

impl MemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Get the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Vec<CardLearningRecord>> {
        Ok(self.records.read().unwrap().clone())
    }

    fn save(&self, records: &[CardLearningRecord]) -> Result<()> {
        *self.records.write().unwrap() = records.to_vec();
        Ok(())
    }
}

//! Record store trait for revise.
//!
//! The store holds the full collection of learning records as an ordered
//! sequence. Callers read the whole collection, mutate in memory, and write
//! the whole collection back; there is no per-record update protocol. This
//! is a single-user, single-writer contract: concurrent writers race with
//! last-write-wins semantics.

use std::sync::Arc;

use crate::core::CardLearningRecord;
use crate::error::Result;

/// Trait for learning record storage backends.
pub trait RecordStore: Send + Sync {
    /// Load the full record collection, in insertion order.
    ///
    /// An empty or missing underlying medium loads as an empty collection.
    fn load(&self) -> Result<Vec<CardLearningRecord>>;

    /// Replace the full record collection.
    fn save(&self, records: &[CardLearningRecord]) -> Result<()>;
}

/// Blanket implementation of RecordStore for Arc-wrapped stores.
///
/// Allows sharing one store between an engine and test assertions.
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn load(&self) -> Result<Vec<CardLearningRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[CardLearningRecord]) -> Result<()> {
        (**self).save(records)
    }
}

//! Review engine: mutating operations over a record store.
//!
//! The engine owns the whole-collection protocol: every mutation loads the
//! full record collection, updates it in memory, and writes the full
//! collection back. Storage failures never block scheduling — reads degrade
//! to an empty collection and writes are best-effort, both logged at warn
//! level.
//!
//! This is a single-user, single-writer design; two engines writing the
//! same store race with last-write-wins semantics.

use chrono::{DateTime, Utc};

use crate::core::{is_due, CardId, CardLearningRecord, ReviewSchedule, ReviewStatus};
use crate::error::{FailOpen, ReviseError, Result};
use crate::storage::RecordStore;

/// Spaced-repetition engine over a record store.
pub struct ReviewEngine<S: RecordStore> {
    store: S,
    schedule: ReviewSchedule,
}

impl<S: RecordStore> ReviewEngine<S> {
    /// Create an engine with the given store and schedule.
    pub fn new(store: S, schedule: ReviewSchedule) -> Self {
        Self { store, schedule }
    }

    /// The schedule this engine applies.
    pub fn schedule(&self) -> &ReviewSchedule {
        &self.schedule
    }

    /// Load the full record collection, failing open to empty.
    pub fn records(&self) -> Vec<CardLearningRecord> {
        self.store
            .load()
            .fail_open_default("loading learning records")
    }

    /// Mark a card as learned for the first time.
    ///
    /// Builds a fresh record (no reviews yet, first due after the first
    /// interval) and upserts it into the store, replacing any existing
    /// record for the same (card, deck) pair without merging history.
    /// Returns the updated collection.
    pub fn learn_card(
        &self,
        card_id: CardId,
        deck_id: &str,
        deck_title: &str,
        now: DateTime<Utc>,
    ) -> Vec<CardLearningRecord> {
        let record = CardLearningRecord {
            card_id,
            deck_id: deck_id.to_string(),
            deck_title: deck_title.to_string(),
            first_learned_at: now,
            last_reviewed_at: now,
            review_count: 0,
            next_review_due: self.schedule.next_review_time(0, now),
            status: ReviewStatus::Pending,
        };

        let mut records = self.records();
        match records
            .iter()
            .position(|r| r.matches(&record.card_id, deck_id))
        {
            Some(pos) => records[pos] = record,
            None => records.push(record),
        }

        self.persist(&records);
        records
    }

    /// Complete a review for a (card, deck) pair.
    ///
    /// Bumps the review count, refreshes both timestamps, and derives the
    /// new due time from the incremented count. The stored status becomes
    /// `Completed` once the interval table is exhausted, otherwise
    /// `Pending` — the fresh interval has by definition not elapsed yet.
    ///
    /// Returns [`ReviseError::RecordNotFound`] if the pair was never
    /// learned; callers must `learn_card` on first exposure.
    pub fn complete_review(
        &self,
        card_id: &CardId,
        deck_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<CardLearningRecord>> {
        let mut records = self.records();

        let pos = records
            .iter()
            .position(|r| r.matches(card_id, deck_id))
            .ok_or_else(|| ReviseError::record_not_found(card_id.clone(), deck_id))?;

        let record = &mut records[pos];
        let new_count = record.review_count + 1;
        record.review_count = new_count;
        record.last_reviewed_at = now;
        record.next_review_due = self.schedule.next_review_time(new_count, now);
        record.status = if new_count >= self.schedule.total_reviews() {
            ReviewStatus::Completed
        } else {
            ReviewStatus::Pending
        };

        self.persist(&records);
        Ok(records)
    }

    /// All records that are not completed and whose review is due.
    ///
    /// Store insertion order is preserved; no re-sorting.
    pub fn due_reviews(&self, now: DateTime<Utc>) -> Vec<CardLearningRecord> {
        self.records()
            .into_iter()
            .filter(|r| {
                self.schedule.classify(r, now) != ReviewStatus::Completed && is_due(r, now)
            })
            .collect()
    }

    /// Best-effort save; a failed write is logged and the in-memory
    /// collection remains the caller's result.
    fn persist(&self, records: &[CardLearningRecord]) {
        self.store
            .save(records)
            .fail_open_with("saving learning records", ());
    }
}

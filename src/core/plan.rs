//! Per-deck aggregation of learning records.
//!
//! The reminder and review-plan views both present records grouped by deck:
//! the reminder shows how many cards in each deck are waiting, the plan view
//! shows overall progress per deck. Grouping preserves store order, with
//! decks ordered by first appearance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{CardLearningRecord, ReviewStatus};
use crate::core::schedule::ReviewSchedule;

/// Records of one deck, in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckGroup {
    /// Deck identifier.
    pub deck_id: String,
    /// Deck display name (taken from the deck's first record).
    pub deck_title: String,
    /// Records belonging to this deck.
    pub records: Vec<CardLearningRecord>,
}

/// Review progress summary for one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckProgress {
    /// Deck identifier.
    pub deck_id: String,
    /// Deck display name.
    pub deck_title: String,
    /// Number of learned cards in the deck.
    pub total: usize,
    /// Cards that have finished every scheduled review.
    pub completed: usize,
    /// Cards currently waiting for a review.
    pub due: usize,
}

/// Group records by deck, preserving insertion order.
pub fn group_by_deck(records: &[CardLearningRecord]) -> Vec<DeckGroup> {
    let mut groups: Vec<DeckGroup> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|g| g.deck_id == record.deck_id) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(DeckGroup {
                deck_id: record.deck_id.clone(),
                deck_title: record.deck_title.clone(),
                records: vec![record.clone()],
            }),
        }
    }

    groups
}

/// Compute per-deck progress summaries.
///
/// Status is re-derived through [`ReviewSchedule::classify`] rather than
/// trusting the cached field, so a record that came due since its last
/// mutation counts as due here.
pub fn deck_progress(
    schedule: &ReviewSchedule,
    records: &[CardLearningRecord],
    now: DateTime<Utc>,
) -> Vec<DeckProgress> {
    group_by_deck(records)
        .into_iter()
        .map(|group| {
            let mut completed = 0;
            let mut due = 0;
            for record in &group.records {
                match schedule.classify(record, now) {
                    ReviewStatus::Completed => completed += 1,
                    ReviewStatus::Due => due += 1,
                    ReviewStatus::Pending => {}
                }
            }
            DeckProgress {
                deck_id: group.deck_id,
                deck_title: group.deck_title,
                total: group.records.len(),
                completed,
                due,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::CardId;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn record(
        card: i64,
        deck: &str,
        title: &str,
        review_count: u32,
        due: DateTime<Utc>,
    ) -> CardLearningRecord {
        CardLearningRecord {
            card_id: CardId::from(card),
            deck_id: deck.to_string(),
            deck_title: title.to_string(),
            first_learned_at: t0(),
            last_reviewed_at: t0(),
            review_count,
            next_review_due: due,
            status: ReviewStatus::Pending,
        }
    }

    #[test]
    fn test_group_by_deck_empty() {
        assert!(group_by_deck(&[]).is_empty());
    }

    #[test]
    fn test_group_by_deck_preserves_order() {
        let records = vec![
            record(1, "d1", "History", 0, t0()),
            record(2, "d2", "Vocab", 0, t0()),
            record(3, "d1", "History", 0, t0()),
        ];

        let groups = group_by_deck(&records);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].deck_id, "d1");
        assert_eq!(groups[0].deck_title, "History");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[0].records[0].card_id, CardId::from(1));
        assert_eq!(groups[0].records[1].card_id, CardId::from(3));

        assert_eq!(groups[1].deck_id, "d2");
        assert_eq!(groups[1].records.len(), 1);
    }

    #[test]
    fn test_deck_progress_counts() {
        let schedule = ReviewSchedule::default();
        let now = t0();

        let records = vec![
            // completed
            record(1, "d1", "History", 5, now - Duration::days(30)),
            // due (past-due, not completed)
            record(2, "d1", "History", 1, now - Duration::hours(1)),
            // pending
            record(3, "d1", "History", 0, now + Duration::hours(10)),
        ];

        let progress = deck_progress(&schedule, &records, now);
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].total, 3);
        assert_eq!(progress[0].completed, 1);
        assert_eq!(progress[0].due, 1);
    }

    #[test]
    fn test_deck_progress_rederives_status() {
        // Stored status says Pending, but the due time has passed.
        let schedule = ReviewSchedule::default();
        let now = t0();
        let stale = record(1, "d1", "History", 1, now - Duration::hours(2));
        assert_eq!(stale.status, ReviewStatus::Pending);

        let progress = deck_progress(&schedule, &[stale], now);
        assert_eq!(progress[0].due, 1);
    }

    #[test]
    fn test_deck_progress_multiple_decks() {
        let schedule = ReviewSchedule::default();
        let now = t0();

        let records = vec![
            record(1, "d1", "History", 5, now),
            record(1, "d2", "Vocab", 0, now - Duration::minutes(1)),
            record(2, "d2", "Vocab", 0, now + Duration::hours(1)),
        ];

        let progress = deck_progress(&schedule, &records, now);
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].deck_id, "d1");
        assert_eq!(progress[0].completed, 1);
        assert_eq!(progress[0].due, 0);
        assert_eq!(progress[1].deck_id, "d2");
        assert_eq!(progress[1].total, 2);
        assert_eq!(progress[1].due, 1);
    }
}

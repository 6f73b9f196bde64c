//! Plan command for revise.
//!
//! Shows per-deck review progress: how many cards are tracked, how many
//! have finished the schedule, how many are waiting right now, and where
//! each card stands in its schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{deck_progress, group_by_deck, CardId, ReviewStatus};
use crate::engine::ReviewEngine;
use crate::storage::RecordStore;

/// Options for the plan command.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the plan command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutput {
    /// Whether the listing succeeded.
    pub success: bool,
    /// Per-deck progress, decks in store order.
    pub decks: Vec<DeckPlanInfo>,
}

/// Progress summary for one deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckPlanInfo {
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
    /// Per-card standing, in store order.
    pub cards: Vec<CardPlanInfo>,
}

/// Standing of one card in its schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPlanInfo {
    /// Card identifier.
    pub card_id: CardId,
    /// Reviews completed so far.
    pub review_count: u32,
    /// Progress through the schedule, 0 to 100.
    pub progress_percent: u8,
    /// Status as of now, re-derived.
    pub status: ReviewStatus,
    /// Human phrasing of the next review time.
    pub next_review: String,
}

/// The plan command implementation.
pub struct PlanCommand<S: RecordStore> {
    engine: ReviewEngine<S>,
}

impl<S: RecordStore> PlanCommand<S> {
    /// Create a new plan command.
    pub fn new(engine: ReviewEngine<S>) -> Self {
        Self { engine }
    }

    /// Run the plan command.
    pub fn run(&self, now: DateTime<Utc>) -> PlanOutput {
        let records = self.engine.records();
        let schedule = self.engine.schedule();

        // Both walk group_by_deck, so deck order lines up
        let groups = group_by_deck(&records);
        let progress = deck_progress(schedule, &records, now);

        let decks = groups
            .into_iter()
            .zip(progress)
            .map(|(group, p)| {
                let cards = group
                    .records
                    .iter()
                    .map(|r| CardPlanInfo {
                        card_id: r.card_id.clone(),
                        review_count: r.review_count,
                        progress_percent: schedule.progress_percent(r),
                        status: schedule.classify(r, now),
                        next_review: schedule.next_review_label(r, now),
                    })
                    .collect();

                DeckPlanInfo {
                    deck_id: p.deck_id,
                    deck_title: p.deck_title,
                    total: p.total,
                    completed: p.completed,
                    due: p.due,
                    cards,
                }
            })
            .collect();

        PlanOutput {
            success: true,
            decks,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PlanOutput, options: &PlanOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &PlanOutput) -> String {
        if output.decks.is_empty() {
            return "No cards learned yet.\n".to_string();
        }

        let mut lines = Vec::new();
        for deck in &output.decks {
            lines.push(format!(
                "{}: {}/{} completed, {} due now",
                deck.deck_title, deck.completed, deck.total, deck.due
            ));
            for card in &deck.cards {
                lines.push(format!(
                    "  {} - {}% done, next review: {}",
                    card.card_id, card.progress_percent, card.next_review
                ));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReviewSchedule;
    use crate::storage::MemoryRecordStore;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn command() -> PlanCommand<MemoryRecordStore> {
        PlanCommand::new(ReviewEngine::new(
            MemoryRecordStore::new(),
            ReviewSchedule::default(),
        ))
    }

    #[test]
    fn test_plan_empty_store() {
        let cmd = command();
        let output = cmd.run(t0());

        assert!(output.success);
        assert!(output.decks.is_empty());
        assert_eq!(
            cmd.format_output(&output, &PlanOptions::default()),
            "No cards learned yet.\n"
        );
    }

    #[test]
    fn test_plan_counts_per_deck() {
        let cmd = command();
        cmd.engine.learn_card(CardId::Num(1), "d1", "History", t0());
        cmd.engine.learn_card(CardId::Num(2), "d1", "History", t0());
        cmd.engine.learn_card(CardId::Num(3), "d2", "Vocab", t0());

        // One card through the whole schedule
        let mut now = t0();
        for _ in 0..5 {
            now = now + Duration::days(1);
            cmd.engine
                .complete_review(&CardId::Num(1), "d1", now)
                .unwrap();
        }

        let output = cmd.run(now);
        assert_eq!(output.decks.len(), 2);

        let d1 = &output.decks[0];
        assert_eq!(d1.total, 2);
        assert_eq!(d1.completed, 1);
        assert_eq!(d1.due, 1);

        let d2 = &output.decks[1];
        assert_eq!(d2.total, 1);
        assert_eq!(d2.completed, 0);
        assert_eq!(d2.due, 1);
    }

    #[test]
    fn test_plan_card_standing() {
        let cmd = command();
        cmd.engine.learn_card(CardId::Num(1), "d1", "History", t0());
        cmd.engine
            .complete_review(&CardId::Num(1), "d1", t0() + Duration::hours(24))
            .unwrap();

        let output = cmd.run(t0() + Duration::hours(25));
        let card = &output.decks[0].cards[0];

        assert_eq!(card.review_count, 1);
        assert_eq!(card.progress_percent, 20);
        assert_eq!(card.status, ReviewStatus::Pending);
        assert_eq!(card.next_review, "2 days from now");
    }

    #[test]
    fn test_plan_rederives_status_for_overdue_card() {
        let cmd = command();
        cmd.engine.learn_card(CardId::Num(1), "d1", "History", t0());

        // Stored status is Pending; a day later the card reads as Due
        let output = cmd.run(t0() + Duration::days(2));
        let card = &output.decks[0].cards[0];
        assert_eq!(card.status, ReviewStatus::Due);
        assert_eq!(card.next_review, "now");
    }

    #[test]
    fn test_format_output_text() {
        let cmd = command();
        cmd.engine.learn_card(CardId::Num(1), "d1", "History", t0());

        let output = cmd.run(t0());
        let formatted = cmd.format_output(&output, &PlanOptions::default());

        assert!(formatted.contains("History: 0/1 completed, 0 due now"));
        assert!(formatted.contains("1 - 0% done, next review: 1 day from now"));
    }

    #[test]
    fn test_format_output_json() {
        let cmd = command();
        cmd.engine.learn_card(CardId::Num(1), "d1", "History", t0());

        let output = cmd.run(t0());
        let options = PlanOptions {
            json: true,
            ..Default::default()
        };

        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("\"deck_title\": \"History\""));
        assert!(formatted.contains("\"progress_percent\": 0"));
    }
}

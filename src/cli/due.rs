//! Due command for revise.
//!
//! Lists cards whose review has come due, grouped by deck the way the
//! reminder view presents them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{group_by_deck, CardId, CardLearningRecord};
use crate::engine::ReviewEngine;
use crate::storage::RecordStore;

/// Options for the due command.
#[derive(Debug, Clone, Default)]
pub struct DueOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the due command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueOutput {
    /// Whether the listing succeeded.
    pub success: bool,
    /// Total number of due cards across all decks.
    pub count: usize,
    /// Due cards grouped by deck, in store order.
    pub decks: Vec<DeckDueInfo>,
}

/// Due cards of one deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckDueInfo {
    /// Deck identifier.
    pub deck_id: String,
    /// Deck display name.
    pub deck_title: String,
    /// Due cards in this deck.
    pub cards: Vec<DueCardInfo>,
}

/// One due card in the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueCardInfo {
    /// Card identifier.
    pub card_id: CardId,
    /// Reviews completed so far.
    pub review_count: u32,
    /// Progress through the schedule, 0 to 100.
    pub progress_percent: u8,
    /// When the review came due.
    pub due_since: DateTime<Utc>,
}

/// The due command implementation.
pub struct DueCommand<S: RecordStore> {
    engine: ReviewEngine<S>,
}

impl<S: RecordStore> DueCommand<S> {
    /// Create a new due command.
    pub fn new(engine: ReviewEngine<S>) -> Self {
        Self { engine }
    }

    /// Run the due command.
    pub fn run(&self, now: DateTime<Utc>) -> DueOutput {
        let due = self.engine.due_reviews(now);
        let count = due.len();

        let decks = group_by_deck(&due)
            .into_iter()
            .map(|group| DeckDueInfo {
                deck_id: group.deck_id,
                deck_title: group.deck_title,
                cards: group.records.iter().map(|r| self.card_info(r)).collect(),
            })
            .collect();

        DueOutput {
            success: true,
            count,
            decks,
        }
    }

    fn card_info(&self, record: &CardLearningRecord) -> DueCardInfo {
        DueCardInfo {
            card_id: record.card_id.clone(),
            review_count: record.review_count,
            progress_percent: self.engine.schedule().progress_percent(record),
            due_since: record.next_review_due,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &DueOutput, options: &DueOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &DueOutput) -> String {
        if output.count == 0 {
            return "No reviews due.\n".to_string();
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "{} card{} due for review:\n",
            output.count,
            if output.count == 1 { "" } else { "s" }
        ));

        for deck in &output.decks {
            lines.push(format!("{} ({} due)", deck.deck_title, deck.cards.len()));
            for card in &deck.cards {
                lines.push(format!(
                    "  {} - review {} of schedule, {}% done",
                    card.card_id,
                    card.review_count + 1,
                    card.progress_percent
                ));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

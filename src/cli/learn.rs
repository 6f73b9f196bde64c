//! Learn command for revise.
//!
//! Records a card as learned for the first time and schedules its first
//! review. Re-learning an already-known card resets its history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::parse_card_id;
use crate::core::CardId;
use crate::engine::ReviewEngine;
use crate::storage::RecordStore;

/// Options for the learn command.
#[derive(Debug, Clone, Default)]
pub struct LearnOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the learn command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnOutput {
    /// Whether the card was recorded.
    pub success: bool,
    /// The card that was learned.
    pub card_id: CardId,
    /// The deck the card belongs to.
    pub deck_id: String,
    /// When the first review is due.
    pub next_review_due: DateTime<Utc>,
    /// Human phrasing of the first review time.
    pub next_review: String,
    /// Total records tracked after the update.
    pub total_records: usize,
}

/// The learn command implementation.
pub struct LearnCommand<S: RecordStore> {
    engine: ReviewEngine<S>,
}

impl<S: RecordStore> LearnCommand<S> {
    /// Create a new learn command.
    pub fn new(engine: ReviewEngine<S>) -> Self {
        Self { engine }
    }

    /// Run the learn command.
    pub fn run(
        &self,
        card_id: &str,
        deck_id: &str,
        deck_title: &str,
        now: DateTime<Utc>,
    ) -> LearnOutput {
        let card_id = parse_card_id(card_id);
        let records = self
            .engine
            .learn_card(card_id.clone(), deck_id, deck_title, now);

        let next_review_due = self.engine.schedule().next_review_time(0, now);
        // The upsert guarantees the pair is present
        let next_review = records
            .iter()
            .find(|r| r.matches(&card_id, deck_id))
            .map(|r| self.engine.schedule().next_review_label(r, now))
            .unwrap_or_else(|| "unknown".to_string());

        LearnOutput {
            success: true,
            card_id,
            deck_id: deck_id.to_string(),
            next_review_due,
            next_review,
            total_records: records.len(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &LearnOutput, options: &LearnOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            format!(
                "Learned card {} in deck {}. Next review: {}.\n",
                output.card_id, output.deck_id, output.next_review
            )
        }
    }
}

//! Review command for revise.
//!
//! Completes a review for a learned card, advancing its position in the
//! interval table. Reviewing a card that was never learned is an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::parse_card_id;
use crate::core::{CardId, ReviewStatus};
use crate::engine::ReviewEngine;
use crate::storage::RecordStore;

/// Options for the review command.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the review command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutput {
    /// Whether the review was recorded.
    pub success: bool,
    /// The card that was reviewed.
    pub card_id: CardId,
    /// The deck the card belongs to.
    pub deck_id: String,
    /// Reviews completed so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Progress through the schedule, 0 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    /// Stored status after the review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    /// Human phrasing of the next review time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<String>,
    /// Error message if the review failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReviewOutput {
    fn failure(card_id: CardId, deck_id: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            card_id,
            deck_id: deck_id.to_string(),
            review_count: None,
            progress_percent: None,
            status: None,
            next_review: None,
            error: Some(error.into()),
        }
    }
}

/// The review command implementation.
pub struct ReviewCommand<S: RecordStore> {
    engine: ReviewEngine<S>,
}

impl<S: RecordStore> ReviewCommand<S> {
    /// Create a new review command.
    pub fn new(engine: ReviewEngine<S>) -> Self {
        Self { engine }
    }

    /// Run the review command.
    pub fn run(&self, card_id: &str, deck_id: &str, now: DateTime<Utc>) -> ReviewOutput {
        let card_id = parse_card_id(card_id);

        let records = match self.engine.complete_review(&card_id, deck_id, now) {
            Ok(records) => records,
            Err(e) => return ReviewOutput::failure(card_id, deck_id, e.to_string()),
        };

        let record = match records.iter().find(|r| r.matches(&card_id, deck_id)) {
            Some(record) => record,
            None => return ReviewOutput::failure(card_id, deck_id, "record vanished after update"),
        };

        ReviewOutput {
            success: true,
            card_id,
            deck_id: deck_id.to_string(),
            review_count: Some(record.review_count),
            progress_percent: Some(self.engine.schedule().progress_percent(record)),
            status: Some(record.status),
            next_review: Some(self.engine.schedule().next_review_label(record, now)),
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ReviewOutput, options: &ReviewOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if !output.success {
            format!(
                "Review failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            )
        } else if output.status == Some(ReviewStatus::Completed) {
            format!(
                "Reviewed card {} in deck {}. All reviews completed.\n",
                output.card_id, output.deck_id
            )
        } else {
            format!(
                "Reviewed card {} in deck {} ({}% done). Next review: {}.\n",
                output.card_id,
                output.deck_id,
                output.progress_percent.unwrap_or(0),
                output.next_review.as_deref().unwrap_or("unknown")
            )
        }
    }
}

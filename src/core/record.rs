//! Learning record types for revise.
//!
//! A [`CardLearningRecord`] tracks the review history of one (card, deck)
//! pair: when it was first learned, how many reviews it has completed, and
//! when the next review falls due. The store holds exactly one record per
//! pair; re-learning a card replaces its record outright.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a card within its deck.
///
/// The persisted format historically allowed both numeric and string ids,
/// so both shapes are kept as a sum type rather than normalizing one into
/// the other. Equality is variant-exact: `Num(4)` and `Text("4")` are
/// different cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    /// Numeric card id.
    Num(i64),
    /// String card id.
    Text(String),
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Num(n) => write!(f, "{}", n),
            CardId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for CardId {
    fn from(n: i64) -> Self {
        CardId::Num(n)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId::Text(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId::Text(s)
    }
}

/// Review lifecycle status of a record.
///
/// Stored for compatibility with the persisted shape, but read paths should
/// re-derive it through [`ReviewSchedule::classify`] so a stale cached value
/// can never drive a scheduling decision.
///
/// [`ReviewSchedule::classify`]: crate::core::ReviewSchedule::classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// The next scheduled review has not come due yet.
    #[default]
    Pending,
    /// The next scheduled review time has passed.
    Due,
    /// All scheduled reviews have been completed.
    Completed,
}

/// Review history of one (card, deck) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLearningRecord {
    /// Card identifier within the deck.
    pub card_id: CardId,
    /// Deck identifier.
    pub deck_id: String,
    /// Deck display name, denormalized for read-time convenience.
    pub deck_title: String,
    /// When the record was created. Set once.
    pub first_learned_at: DateTime<Utc>,
    /// Updated by every review, including creation.
    pub last_reviewed_at: DateTime<Utc>,
    /// Number of completed review events (0 = learned, not yet reviewed).
    pub review_count: u32,
    /// When the next review becomes due.
    pub next_review_due: DateTime<Utc>,
    /// Cached status as of the last mutation.
    pub status: ReviewStatus,
}

impl CardLearningRecord {
    /// Check whether this record belongs to the given (card, deck) pair.
    pub fn matches(&self, card_id: &CardId, deck_id: &str) -> bool {
        self.card_id == *card_id && self.deck_id == deck_id
    }
}

/// Check whether a record's next review has come due.
///
/// Inclusive at the boundary: a review scheduled for exactly `now` is due.
/// This is the sole time comparison in the crate; all due-related decisions
/// route through it.
pub fn is_due(record: &CardLearningRecord, now: DateTime<Utc>) -> bool {
    now >= record.next_review_due
}

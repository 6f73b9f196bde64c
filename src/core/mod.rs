//! Core scheduling types and pure functions.

pub mod plan;
pub mod record;
pub mod schedule;

pub use plan::{deck_progress, group_by_deck, DeckGroup, DeckProgress};
pub use record::{is_due, CardId, CardLearningRecord, ReviewStatus};
pub use schedule::{ReviewSchedule, EBBINGHAUS_INTERVALS};

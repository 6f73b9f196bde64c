//! CLI commands for revise.
//!
//! One module per subcommand:
//! - **learn**: record a card as learned for the first time
//! - **review**: complete a review and advance the schedule
//! - **due**: list cards whose review is due, grouped by deck
//! - **plan**: per-deck progress overview
//!
//! Each command follows the same shape: an `Options` struct (json/quiet
//! flags), a serializable `Output` with a `success` field, and a
//! `format_output` method that renders JSON or human-readable text.

pub mod due;
pub mod learn;
pub mod plan;
pub mod review;

pub use due::DueCommand;
pub use learn::LearnCommand;
pub use plan::PlanCommand;
pub use review::ReviewCommand;

use crate::core::CardId;

/// Parse a card id argument into its numeric or string form.
///
/// An argument that is a canonical decimal integer becomes a numeric id;
/// anything else (including zero-padded digits like "007") stays a string
/// so the id round-trips unchanged.
pub fn parse_card_id(raw: &str) -> CardId {
    match raw.parse::<i64>() {
        Ok(n) if n.to_string() == raw => CardId::Num(n),
        _ => CardId::Text(raw.to_string()),
    }
}

//! Revise - Ebbinghaus-curve spaced repetition for flashcard decks
//!
//! Revise schedules flashcard reviews along a forgetting-curve interval
//! table: after learning a card you review it 1 day later, then 2, 7, 14,
//! and 30 days after each successive review. It tracks one learning record
//! per (card, deck) pair, lists the reviews that have come due, and reports
//! per-deck progress.

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod storage;

pub use config::Config;
pub use core::{
    deck_progress, group_by_deck, is_due, CardId, CardLearningRecord, DeckGroup, DeckProgress,
    ReviewSchedule, ReviewStatus, EBBINGHAUS_INTERVALS,
};
pub use engine::ReviewEngine;
pub use error::{ReviseError, Result};
pub use storage::{FileRecordStore, MemoryRecordStore, RecordStore};

// CLI commands
pub use cli::{DueCommand, LearnCommand, PlanCommand, ReviewCommand};

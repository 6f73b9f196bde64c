//! Unified error types for revise with fail-open philosophy.
//!
//! Scheduling must keep working when persistence misbehaves: a record store
//! that cannot be read degrades to an empty collection, and a failed write
//! is logged while the in-memory result is still returned. No error in this
//! crate is fatal to the process.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::CardId;

/// The main error type for revise operations.
#[derive(Error, Debug)]
pub enum ReviseError {
    /// I/O errors from record store file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading or validation errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// A review was completed for a (card, deck) pair that was never learned.
    ///
    /// Reviewing requires a prior learn; an unknown pair is reported rather
    /// than silently ignored.
    #[error("no learning record for card {card_id} in deck {deck_id}")]
    RecordNotFound { card_id: CardId, deck_id: String },
}

/// A specialized Result type for revise operations.
pub type Result<T> = std::result::Result<T, ReviseError>;

impl ReviseError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a record-not-found error.
    pub fn record_not_found(card_id: CardId, deck_id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            card_id,
            deck_id: deck_id.into(),
        }
    }
}

impl From<io::Error> for ReviseError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ReviseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error at warn level and continue with a safe value instead of
/// propagating failures into scheduling decisions.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the revise CLI.
pub mod exit_codes {
    /// Command succeeded.
    pub const SUCCESS: i32 = 0;

    /// Command failed (e.g. reviewing a card that was never learned).
    pub const ERROR: i32 = 1;

    /// Process crashed; the panic handler uses this.
    pub const CRASH: i32 = 3;
}

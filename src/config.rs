//! Configuration loading for revise.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.revise/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The scheduler runs with the Ebbinghaus
//! defaults when no config exists, and invalid values are warned about and
//! replaced with defaults rather than failing.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ReviewSchedule, EBBINGHAUS_INTERVALS};
use crate::error::{ReviseError, Result};

/// Main configuration struct for revise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Review interval schedule configuration.
    pub schedule: ScheduleConfig,
    /// Reminder polling configuration.
    pub reminder: ReminderConfig,
}

/// Review interval schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Wait times between successive reviews, in hours.
    ///
    /// The table length defines how many reviews a card goes through
    /// before it is completed.
    pub intervals_hours: Vec<i64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            intervals_hours: EBBINGHAUS_INTERVALS.to_vec(),
        }
    }
}

/// Reminder polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReminderConfig {
    /// Minutes between due-review refreshes in a polling host.
    pub poll_minutes: u32,
}

/// Minimum valid poll interval.
pub const MIN_POLL_MINUTES: u32 = 1;

impl ReminderConfig {
    /// Check if a poll interval is valid (must be >= 1 minute).
    pub fn is_valid_poll_minutes(value: u32) -> bool {
        value >= MIN_POLL_MINUTES
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { poll_minutes: 60 }
    }
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        let mut config = Self::load_user_config().unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Load user config from `~/.revise/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = revise_home()?;
        let config_path = home.join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| ReviseError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| ReviseError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // REVISE_INTERVALS: comma-separated hours, e.g. "24,48,168"
        if let Ok(val) = env::var("REVISE_INTERVALS") {
            match parse_intervals(&val) {
                Ok(hours) => self.schedule.intervals_hours = hours,
                Err(e) => eprintln!(
                    "Warning: Invalid REVISE_INTERVALS value '{}': {}. \
                    Using configured intervals.",
                    val, e
                ),
            }
        }

        // REVISE_POLL_MINUTES
        if let Ok(val) = env::var("REVISE_POLL_MINUTES") {
            match val.parse::<u32>() {
                Ok(n) => {
                    if ReminderConfig::is_valid_poll_minutes(n) {
                        self.reminder.poll_minutes = n;
                    } else {
                        eprintln!(
                            "Warning: Invalid REVISE_POLL_MINUTES value '{}'. \
                            Must be >= {}. Using default '{}'.",
                            n, MIN_POLL_MINUTES, self.reminder.poll_minutes
                        );
                    }
                }
                Err(_) => eprintln!(
                    "Warning: Invalid REVISE_POLL_MINUTES value '{}'. \
                    Expected a positive integer. Using default '{}'.",
                    val, self.reminder.poll_minutes
                ),
            }
        }
    }

    /// Build the review schedule from this config.
    ///
    /// An invalid interval table (empty or non-positive entries) is warned
    /// about and replaced with the Ebbinghaus default.
    pub fn review_schedule(&self) -> ReviewSchedule {
        match ReviewSchedule::new(self.schedule.intervals_hours.clone()) {
            Ok(schedule) => schedule,
            Err(e) => {
                tracing::warn!("invalid configured interval table: {} (using default)", e);
                ReviewSchedule::default()
            }
        }
    }
}

/// Parse a comma-separated list of interval hours.
fn parse_intervals(value: &str) -> std::result::Result<Vec<i64>, String> {
    let hours: Vec<i64> = value
        .split(',')
        .map(|s| s.trim().parse::<i64>().map_err(|e| e.to_string()))
        .collect::<std::result::Result<_, _>>()?;
    if hours.is_empty() || hours.iter().any(|h| *h <= 0) {
        return Err("intervals must be positive hours".to_string());
    }
    Ok(hours)
}

/// Get the revise home directory.
///
/// Checks `REVISE_HOME` first, then falls back to `~/.revise`.
/// An invalid `REVISE_HOME` (empty) is ignored.
pub fn revise_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("REVISE_HOME") {
        if home.is_empty() {
            tracing::warn!("REVISE_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("REVISE_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".revise"));
    }

    // Fallback for containerized/minimal environments without HOME
    let fallback_path = std::env::temp_dir().join("revise");
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get the learning records file path.
///
/// Returns `<revise_home>/records.json`.
pub fn records_path() -> Option<PathBuf> {
    revise_home().map(|h| h.join("records.json"))
}

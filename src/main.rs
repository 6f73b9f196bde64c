//! Revise - Ebbinghaus-curve spaced repetition for flashcard decks
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use revise::config::{revise_home, Config};
use revise::engine::ReviewEngine;
use revise::error::exit_codes;
use revise::storage::FileRecordStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// Revise - Ebbinghaus-curve spaced repetition for flashcard decks
#[derive(Parser)]
#[command(name = "revise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a card as learned and schedule its first review
    Learn {
        /// Card identifier (numeric or string)
        card_id: String,
        /// Deck identifier
        deck_id: String,
        /// Deck display name (defaults to the deck id)
        #[arg(long)]
        title: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Complete a review and advance the card's schedule
    Review {
        /// Card identifier (numeric or string)
        card_id: String,
        /// Deck identifier
        deck_id: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List cards whose review is due, grouped by deck
    Due {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show per-deck review progress
    Plan {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("revise error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.revise/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("revise panic: {}", info);

        // Try to log to crash file
        if let Some(home) = revise_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Learn {
            card_id,
            deck_id,
            title,
            json,
            quiet,
        } => run_learn(&card_id, &deck_id, title.as_deref(), json, quiet),
        Commands::Review {
            card_id,
            deck_id,
            json,
            quiet,
        } => run_review(&card_id, &deck_id, json, quiet),
        Commands::Due { json, quiet } => run_due(json, quiet),
        Commands::Plan { json, quiet } => run_plan(json, quiet),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Build the engine over the default file store.
fn file_engine() -> Result<ReviewEngine<FileRecordStore>, Box<dyn std::error::Error>> {
    let config = Config::load();
    let store = FileRecordStore::new()?;
    Ok(ReviewEngine::new(store, config.review_schedule()))
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn run_learn(
    card_id: &str,
    deck_id: &str,
    title: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use revise::cli::learn::{LearnCommand, LearnOptions};

    let cmd = LearnCommand::new(file_engine()?);
    let options = LearnOptions { json, quiet };

    let output = cmd.run(
        card_id,
        deck_id,
        title.unwrap_or(deck_id),
        chrono::Utc::now(),
    );
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_review(
    card_id: &str,
    deck_id: &str,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use revise::cli::review::{ReviewCommand, ReviewOptions};

    let cmd = ReviewCommand::new(file_engine()?);
    let options = ReviewOptions { json, quiet };

    let output = cmd.run(card_id, deck_id, chrono::Utc::now());
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_due(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use revise::cli::due::{DueCommand, DueOptions};

    let cmd = DueCommand::new(file_engine()?);
    let options = DueOptions { json, quiet };

    let output = cmd.run(chrono::Utc::now());
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_plan(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use revise::cli::plan::{PlanCommand, PlanOptions};

    let cmd = PlanCommand::new(file_engine()?);
    let options = PlanOptions { json, quiet };

    let output = cmd.run(chrono::Utc::now());
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================

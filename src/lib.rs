/*!
# Moodlog

Moodlog is a private mood journal. Each entry records a mood from a fixed
five-level scale together with free text. The text is encrypted before it is
stored; the mood and the calendar day stay in the clear so statistics can be
computed without the key.

## Core Features

- Write entries whose text is encrypted under a shared secret
- Read entries back, with tampered or foreign entries reported individually
- Mood statistics: entry count, average mood, consecutive-day streak
- Community posts counted alongside the personal statistics

## Architecture

- `analytics`: Pure statistics over entry metadata
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `crypto`: Entry key loading and the text codec
- `db`: SQLite storage for entries and community posts
- `errors`: Error handling infrastructure
- `journal_core`: Moods, reference frame and entry records
- `ops`: High-level operations tying the above together

## Usage Example

```rust,no_run
use moodlog::crypto::{load_entry_key, EnvKeyProvider};
use moodlog::db::Database;
use moodlog::journal_core::Mood;
use moodlog::{ops, Config};

fn main() -> moodlog::AppResult<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let key = load_entry_key(&EnvKeyProvider::default())?;
    let now = chrono::Utc::now();
    ops::add_entry(&db, &key, &config.user, "A calm morning", Mood::Happy, now, &config.frame)?;

    let stats = ops::compute_stats(&db, &config.user, &config.display_name, now, &config.frame)?;
    println!("Streak: {} days", stats.streak);
    Ok(())
}
```
*/

/// Mood statistics
pub mod analytics;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Entry key handling and text encryption
pub mod crypto;
/// SQLite storage
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Core journal data model
pub mod journal_core;
/// High-level journal operations
pub mod ops;

// Re-export important types for convenience
pub use analytics::StatsSummary;
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult, DecodeFailure};
pub use journal_core::{JournalEntry, Mood, ReferenceFrame, StoredEntry};

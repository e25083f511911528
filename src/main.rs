/*!
# Moodlog - A Private Mood Journal

This file contains the main application flow: logging setup, configuration,
key acquisition and dispatch of the subcommands.

## Usage

```text
moodlog [OPTIONS] <COMMAND>

Commands:
  add     Write a new entry (text is read from stdin when omitted)
  list    Show all entries, newest first
  delete  Permanently delete an entry
  stats   Show mood statistics
  post    Publish a community post under your display name
  moods   List the accepted moods

Options:
      --db <DB>              Database file (overrides MOODLOG_DB)
      --user <USER>          Journal owner identity (overrides MOODLOG_USER)
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
  -v, --verbose              Print verbose output
```

## Configuration

- `MOODLOG_DB`: Database path (defaults to ~/.local/share/moodlog/moodlog.db)
- `MOODLOG_USER` or `USER`: Journal owner identity
- `MOODLOG_DISPLAY_NAME`: Community display name (defaults to the owner)
- `MOODLOG_UTC_OFFSET`: Offset whose calendar days entries are filed under
- `MOODLOG_KEY`: Shared entry secret; prompted for on a terminal when unset
*/

use chrono::Utc;
use moodlog::cli::{CliArgs, Commands};
use moodlog::config::Config;
use moodlog::constants::{
    DEFAULT_LOG_LEVEL, ENV_VAR_MOODLOG_KEY, LIST_TIME_FORMAT, LOG_FORMAT_JSON,
    TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use moodlog::crypto::{load_entry_key, EntryKey, EnvKeyProvider, KeyProvider, PromptKeyProvider};
use moodlog::db::Database;
use moodlog::errors::{AppError, AppResult};
use moodlog::journal_core::{format_date_only, Mood, StoredEntry};
use moodlog::ops::{self, EntryView};
use moodlog::StatsSummary;
use std::env;
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args.log_format, args.verbose);

    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the global subscriber, writing to stderr so stdout carries only
/// command output.
fn init_tracing(log_format: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if log_format == LOG_FORMAT_JSON {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    info!("Starting moodlog");
    debug!("CLI command: {:?}", args.command);

    // Read the clock once per invocation
    let now = Utc::now();

    match args.command {
        Commands::Add { mood, text } => {
            let (config, db) = open_journal(args.db.as_deref(), args.user.as_deref())?;
            let mood: Mood = mood.parse()?;
            let text = match text {
                Some(text) => text,
                None => read_stdin_text()?,
            };
            if text.trim().is_empty() {
                return Err(AppError::Journal("Entry text cannot be empty".to_string()));
            }

            let key = acquire_key()?;
            let entry = ops::add_entry(&db, &key, &config.user, &text, mood, now, &config.frame)?;
            println!("{}", entry.id);
        }
        Commands::List { json } => {
            let (config, db) = open_journal(args.db.as_deref(), args.user.as_deref())?;
            let key = acquire_key()?;
            let views = ops::read_entries(&db, &key, &config.user)?;
            if json {
                print_json(&entries_json(&views, &config))?;
            } else {
                print_entries(&views, &config);
            }
        }
        Commands::Delete { id } => {
            let (config, db) = open_journal(args.db.as_deref(), args.user.as_deref())?;
            ops::delete_entry(&db, &config.user, &id)?;
            println!("Deleted {}", id);
        }
        Commands::Stats { json } => {
            let (config, db) = open_journal(args.db.as_deref(), args.user.as_deref())?;
            let summary =
                ops::compute_stats(&db, &config.user, &config.display_name, now, &config.frame)?;
            if json {
                print_json(&summary)?;
            } else {
                print_stats(&summary);
            }
        }
        Commands::Post { body } => {
            let (config, db) = open_journal(args.db.as_deref(), args.user.as_deref())?;
            let id = ops::publish_post(&db, &config.display_name, &body, now)?;
            println!("{}", id);
        }
        Commands::Moods => print_moods(),
    }

    Ok(())
}

/// Loads configuration and opens the journal database.
fn open_journal(db: Option<&str>, user: Option<&str>) -> AppResult<(Config, Database)> {
    let config = Config::load_with_overrides(db, user)?;
    debug!("Configuration: {:?}", config);

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    Ok((config, db))
}

/// Picks the key source: the environment when set, otherwise a prompt if
/// stdin is a terminal.
fn acquire_key() -> AppResult<EntryKey> {
    let provider: Box<dyn KeyProvider> =
        if env::var_os(ENV_VAR_MOODLOG_KEY).is_none() && io::stdin().is_terminal() {
            Box::new(PromptKeyProvider)
        } else {
            Box::new(EnvKeyProvider::default())
        };
    load_entry_key(provider.as_ref())
}

fn read_stdin_text() -> AppResult<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

fn print_moods() {
    for mood in Mood::ALL {
        println!("{}  {}  {}", mood.value(), mood.symbol(), mood.label());
    }
}

fn print_entries(views: &[EntryView], config: &Config) {
    if views.is_empty() {
        println!("No entries yet");
        return;
    }

    for view in views {
        match &view.entry {
            StoredEntry::Entry(entry) => {
                let local = entry.created_at.with_timezone(&config.frame.offset());
                println!(
                    "{}  {} {}  {} {}",
                    entry.id,
                    format_date_only(entry.date_only),
                    local.format(LIST_TIME_FORMAT),
                    entry.mood.symbol(),
                    entry.mood.label()
                );
            }
            StoredEntry::Unreadable(raw) => {
                println!(
                    "{}  {}  {} (unrecognised metadata)",
                    raw.id, raw.date_only, raw.mood
                );
            }
        }
        for line in view.display_text().lines() {
            println!("    {}", line);
        }
    }

    let unreadable = views.iter().filter(|view| view.entry.is_unreadable()).count();
    if unreadable > 0 {
        println!("{} of {} entries have unrecognised metadata", unreadable, views.len());
    }
}

fn entries_json(views: &[EntryView], config: &Config) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = views
        .iter()
        .map(|view| match &view.entry {
            StoredEntry::Entry(entry) => serde_json::json!({
                "id": entry.id,
                "mood": entry.mood,
                "mood_value": entry.mood.value(),
                "created_at": entry.created_at.with_timezone(&config.frame.offset()).to_rfc3339(),
                "date_only": format_date_only(entry.date_only),
                "text": view.display_text(),
                "decrypted": view.text.is_ok(),
                "metadata_readable": true,
            }),
            StoredEntry::Unreadable(raw) => serde_json::json!({
                "id": raw.id,
                "mood": raw.mood,
                "mood_value": null,
                "created_at": raw.created_at,
                "date_only": raw.date_only,
                "text": view.display_text(),
                "decrypted": view.text.is_ok(),
                "metadata_readable": false,
            }),
        })
        .collect();
    serde_json::Value::Array(entries)
}

fn print_stats(summary: &StatsSummary) {
    println!("Entries:          {}", summary.total_entries);
    println!("Average mood:     {:.1}", summary.average_mood);
    println!("Streak:           {} days", summary.streak);
    println!("Community posts:  {}", summary.community_posts);

    let skipped = summary.skipped;
    if skipped.unparseable_dates > 0 || skipped.unknown_moods > 0 {
        println!(
            "Skipped:          {} with unreadable dates, {} with unknown moods",
            skipped.unparseable_dates, skipped.unknown_moods
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Journal(format!("Failed to render JSON: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

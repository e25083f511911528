//! Command-line interface definitions.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Parser, Subcommand};

/// A private mood journal with encrypted entries
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Database file (overrides MOODLOG_DB)
    #[clap(long, global = true)]
    pub db: Option<String>,

    /// Journal owner identity (overrides MOODLOG_USER)
    #[clap(long, global = true)]
    pub user: Option<String>,

    /// Log output format
    #[clap(
        long,
        global = true,
        value_name = "FORMAT",
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Write a new entry (text is read from stdin when omitted)
    Add {
        /// Mood label or symbol, e.g. "happy" or "🙂"
        #[clap(short = 'm', long)]
        mood: String,

        /// Entry text
        text: Option<String>,
    },

    /// Show all entries, newest first
    List {
        /// Emit JSON instead of text
        #[clap(long)]
        json: bool,
    },

    /// Permanently delete an entry
    Delete {
        /// Entry id as printed by `add` or `list`
        id: String,
    },

    /// Show mood statistics
    Stats {
        /// Emit JSON instead of text
        #[clap(long)]
        json: bool,
    },

    /// Publish a community post under your display name
    Post {
        /// Post body
        body: String,
    },

    /// List the accepted moods
    Moods,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        <CliArgs as Parser>::parse()
    }
}

//! High-level operations for the mood journal.
//!
//! This module provides the user-facing operations that orchestrate the codec,
//! the record store and the analytics engine: writing encrypted entries,
//! reading them back, deleting them, computing statistics and posting to the
//! community feed.

pub mod community;
pub mod entries;
pub mod stats;

// Re-export commonly used functions
pub use community::publish_post;
pub use entries::{add_entry, delete_entry, read_entries, EntryView};
pub use stats::compute_stats;

//! Statistics over a user's entries and community activity.

use crate::analytics::{compute_summary, StatsSummary};
use crate::db::{community, entries, Database};
use crate::errors::AppResult;
use crate::journal_core::ReferenceFrame;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Computes the `StatsSummary` for `owner` as of `now`.
///
/// Only clear metadata is read, so no key is needed. Community posts are
/// counted under `display_name`.
///
/// # Errors
///
/// Returns an error if database operations fail.
pub fn compute_stats(
    db: &Database,
    owner: &str,
    display_name: &str,
    now: DateTime<Utc>,
    frame: &ReferenceFrame,
) -> AppResult<StatsSummary> {
    let conn = db.get_conn()?;
    let records = entries::list_mood_records(&conn, owner)?;
    let community_posts = community::count_posts_by_author(&conn, display_name)?;
    debug!(
        records = records.len(),
        community_posts, "Loaded inputs for stats"
    );

    let summary = compute_summary(&records, community_posts, now, frame);
    info!(
        total_entries = summary.total_entries,
        streak = summary.streak,
        "Computed stats"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EntryKey;
    use crate::journal_core::Mood;
    use crate::ops::{add_entry, publish_post};
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_compute_stats_combines_entries_and_posts() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();
        let key = EntryKey::from_bytes([1u8; 32]);
        let frame = ReferenceFrame::utc();
        let at = |day| Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();

        add_entry(&db, &key, "alice", "a", Mood::Awful, at(9), &frame).unwrap();
        add_entry(&db, &key, "alice", "b", Mood::Great, at(10), &frame).unwrap();
        add_entry(&db, &key, "bob", "c", Mood::Okay, at(10), &frame).unwrap();
        publish_post(&db, "Alice", "hello", at(10)).unwrap();

        let summary = compute_stats(&db, "alice", "Alice", at(10), &frame).unwrap();
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.average_mood, 3.0);
        assert_eq!(summary.streak, 2);
        assert_eq!(summary.community_posts, 1);
    }
}

use chrono::{DateTime, TimeZone, Utc};
use moodlog::constants::UNDECRYPTABLE_PLACEHOLDER;
use moodlog::crypto::{encrypt, EntryKey};
use moodlog::db::{entries, Database};
use moodlog::errors::DecodeFailure;
use moodlog::journal_core::{Mood, NewEntry, ReferenceFrame, StoredEntry};
use moodlog::ops;
use tempfile::TempDir;

fn setup() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(&temp_dir.path().join("moodlog.db")).unwrap();
    db.initialize_schema().unwrap();
    (temp_dir, db)
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0).unwrap()
}

#[test]
fn test_delete_then_recompute_reflects_removal_once() {
    let (_dir, db) = setup();
    let key = EntryKey::from_bytes([3u8; 32]);
    let frame = ReferenceFrame::utc();

    ops::add_entry(&db, &key, "alice", "day 8", Mood::Okay, at(8, 9), &frame).unwrap();
    let middle = ops::add_entry(&db, &key, "alice", "day 9", Mood::Great, at(9, 9), &frame).unwrap();
    ops::add_entry(&db, &key, "alice", "day 10", Mood::Okay, at(10, 9), &frame).unwrap();

    let before = ops::compute_stats(&db, "alice", "alice", at(10, 20), &frame).unwrap();
    assert_eq!(before.total_entries, 3);
    assert_eq!(before.streak, 3);
    assert_eq!(before.average_mood, 3.7);

    ops::delete_entry(&db, "alice", &middle.id).unwrap();

    let after = ops::compute_stats(&db, "alice", "alice", at(10, 20), &frame).unwrap();
    assert_eq!(after.total_entries, 2);
    assert_eq!(after.streak, 1);
    assert_eq!(after.average_mood, 3.0);
}

#[test]
fn test_one_undecryptable_entry_does_not_block_others() {
    let (_dir, db) = setup();
    let key = EntryKey::from_bytes([3u8; 32]);
    let foreign = EntryKey::from_bytes([4u8; 32]);
    let frame = ReferenceFrame::utc();

    for day in 1..=4 {
        ops::add_entry(&db, &key, "alice", &format!("entry {}", day), Mood::Happy, at(day, 9), &frame)
            .unwrap();
    }

    // An entry sealed under a different key, written straight to the store
    let conn = db.get_conn().unwrap();
    let stray = NewEntry::new(
        "alice",
        encrypt("written elsewhere", &foreign).unwrap(),
        Mood::Bad,
        at(5, 9),
        &frame,
    );
    entries::insert_entry(&conn, stray).unwrap();
    drop(conn);

    let views = ops::read_entries(&db, &key, "alice").unwrap();
    assert_eq!(views.len(), 5);

    let failures: Vec<_> = views.iter().filter(|v| v.text.is_err()).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].text, Err(DecodeFailure::Authentication));
    assert_eq!(failures[0].display_text(), UNDECRYPTABLE_PLACEHOLDER);

    let readable: Vec<&str> = views
        .iter()
        .filter_map(|v| v.text.as_deref().ok())
        .collect();
    assert_eq!(readable, vec!["entry 4", "entry 3", "entry 2", "entry 1"]);
}

#[test]
fn test_stats_unaffected_by_decryptability() {
    let (_dir, db) = setup();
    let frame = ReferenceFrame::utc();
    ops::add_entry(&db, &EntryKey::from_bytes([1u8; 32]), "alice", "a", Mood::Bad, at(9, 9), &frame)
        .unwrap();
    ops::add_entry(&db, &EntryKey::from_bytes([2u8; 32]), "alice", "b", Mood::Happy, at(10, 9), &frame)
        .unwrap();

    let summary = ops::compute_stats(&db, "alice", "alice", at(10, 12), &frame).unwrap();
    assert_eq!(summary.total_entries, 2);
    assert_eq!(summary.average_mood, 3.0);
    assert_eq!(summary.streak, 2);
}

#[test]
fn test_reference_frame_decides_entry_day() {
    let (_dir, db) = setup();
    let key = EntryKey::from_bytes([5u8; 32]);
    let tokyo = ReferenceFrame::parse("+09:00").unwrap();

    // 20:00 UTC on the 9th is the 10th in +09:00
    let entry = ops::add_entry(&db, &key, "alice", "late", Mood::Okay, at(9, 20), &tokyo).unwrap();
    assert_eq!(entry.date_only.to_string(), "2024-04-10");

    let summary = ops::compute_stats(&db, "alice", "alice", at(10, 1), &tokyo).unwrap();
    assert_eq!(summary.streak, 1);
}

#[test]
fn test_community_posts_counted_by_display_name() {
    let (_dir, db) = setup();
    let frame = ReferenceFrame::utc();

    ops::publish_post(&db, "Alice", "first", at(10, 8)).unwrap();
    ops::publish_post(&db, "Alice", "second", at(10, 9)).unwrap();
    ops::publish_post(&db, "Someone else", "hi", at(10, 9)).unwrap();

    let summary = ops::compute_stats(&db, "alice", "Alice", at(10, 12), &frame).unwrap();
    assert_eq!(summary.community_posts, 2);
    assert_eq!(summary.total_entries, 0);
}

#[test]
fn test_database_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("moodlog.db");
    let key = EntryKey::from_bytes([6u8; 32]);

    {
        let db = Database::open(&path).unwrap();
        db.initialize_schema().unwrap();
        ops::add_entry(&db, &key, "alice", "kept", Mood::Great, at(1, 9), &ReferenceFrame::utc())
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    db.initialize_schema().unwrap();
    let views = ops::read_entries(&db, &key, "alice").unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].text.as_deref(), Ok("kept"));
}

#[test]
fn test_entry_with_unknown_mood_is_listed_and_counted() {
    let (_dir, db) = setup();
    let key = EntryKey::from_bytes([7u8; 32]);
    let sealed = encrypt("from the six-face picker", &key).unwrap();

    let conn = db.get_conn().unwrap();
    conn.execute(
        "INSERT INTO entries (id, owner, cipher_text, mood, created_at, date_only) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params!["legacy", "alice", sealed.as_str(), "😢", "2024-04-10T09:00:00Z", "2024-04-10"],
    )
    .unwrap();
    drop(conn);

    let views = ops::read_entries(&db, &key, "alice").unwrap();
    let summary = ops::compute_stats(&db, "alice", "alice", at(10, 12), &ReferenceFrame::utc()).unwrap();

    // Everything stats counts is visible in the listing
    assert_eq!(views.len(), summary.total_entries);
    assert_eq!(summary.streak, 1);
    assert_eq!(summary.skipped.unknown_moods, 1);

    match &views[0].entry {
        StoredEntry::Unreadable(raw) => {
            assert_eq!(raw.id, "legacy");
            assert_eq!(raw.mood, "😢");
        }
        other => panic!("Expected an unreadable entry, got {:?}", other),
    }
    assert_eq!(views[0].text.as_deref(), Ok("from the six-face picker"));
}

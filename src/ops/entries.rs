//! Write, read and delete encrypted journal entries.

use crate::constants::UNDECRYPTABLE_PLACEHOLDER;
use crate::crypto::{decrypt, encrypt, EntryKey};
use crate::db::{entries, Database};
use crate::errors::{AppError, AppResult, DecodeFailure};
use crate::journal_core::{JournalEntry, Mood, NewEntry, ReferenceFrame, StoredEntry};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// A stored entry paired with the outcome of decrypting its text.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub entry: StoredEntry,
    pub text: Result<String, DecodeFailure>,
}

impl EntryView {
    /// Decrypted text, or the placeholder shown for entries that fail to decode.
    pub fn display_text(&self) -> &str {
        match &self.text {
            Ok(text) => text,
            Err(_) => UNDECRYPTABLE_PLACEHOLDER,
        }
    }
}

/// Encrypts `text` and stores it as a new entry for `owner`.
///
/// # Flow
///
/// 1. Encrypt the text under the shared key
/// 2. Stamp the creation instant and its calendar day in `frame`
/// 3. Insert the record and return it with its assigned id
///
/// # Errors
///
/// Returns an error if:
/// - The owner is empty
/// - Encryption fails
/// - Database operations fail
pub fn add_entry(
    db: &Database,
    key: &EntryKey,
    owner: &str,
    text: &str,
    mood: Mood,
    now: DateTime<Utc>,
    frame: &ReferenceFrame,
) -> AppResult<JournalEntry> {
    if owner.trim().is_empty() {
        return Err(AppError::Journal("Entry owner cannot be empty".to_string()));
    }

    let cipher_text = encrypt(text, key)?;
    let new_entry = NewEntry::new(owner, cipher_text, mood, now, frame);

    let conn = db.get_conn()?;
    let entry = entries::insert_entry(&conn, new_entry)?;

    info!(entry_id = %entry.id, mood = %entry.mood, "Entry saved");
    Ok(entry)
}

/// Loads and decrypts all of `owner`'s entries, newest first.
///
/// An entry that fails to decrypt is returned with its `DecodeFailure` so the
/// remaining entries are still shown. Entries with unreadable metadata are
/// decrypted and returned too.
///
/// # Errors
///
/// Returns an error if database operations fail.
pub fn read_entries(db: &Database, key: &EntryKey, owner: &str) -> AppResult<Vec<EntryView>> {
    let conn = db.get_conn()?;
    let stored = entries::list_entries(&conn, owner)?;
    debug!("Decrypting {} entries", stored.len());

    let views: Vec<EntryView> = stored
        .into_iter()
        .map(|entry| {
            let text = decrypt(entry.cipher_text(), key);
            if let Err(failure) = &text {
                warn!(entry_id = %entry.id(), error = %failure, "Failed to decrypt entry");
            }
            EntryView { entry, text }
        })
        .collect();

    let unreadable = views.iter().filter(|view| view.entry.is_unreadable()).count();
    if unreadable > 0 {
        warn!(count = unreadable, "Some entries have unreadable metadata");
    }

    Ok(views)
}

/// Permanently deletes one of `owner`'s entries.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if `owner` has no entry with this id.
pub fn delete_entry(db: &Database, owner: &str, id: &str) -> AppResult<()> {
    let conn = db.get_conn()?;
    entries::delete_entry(&conn, owner, id)?;
    info!(entry_id = %id, "Entry deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CIPHERTEXT_V1_PREFIX;
    use crate::errors::DatabaseError;
    use chrono::TimeZone;
    use rusqlite::params;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database, EntryKey) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();
        (temp_dir, db, EntryKey::from_bytes([7u8; 32]))
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_entry_stores_only_ciphertext() {
        let (_dir, db, key) = setup();
        let frame = ReferenceFrame::utc();

        let entry = add_entry(&db, &key, "alice", "Dear diary", Mood::Happy, at(10), &frame).unwrap();
        assert!(entry.cipher_text.as_str().starts_with(CIPHERTEXT_V1_PREFIX));
        assert!(!entry.cipher_text.as_str().contains("Dear diary"));

        let views = read_entries(&db, &key, "alice").unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].text, Ok("Dear diary".to_string()));
        assert_eq!(views[0].entry.id(), entry.id);
        assert_eq!(views[0].entry, StoredEntry::Entry(entry));
    }

    #[test]
    fn test_add_entry_rejects_empty_owner() {
        let (_dir, db, key) = setup();
        let result = add_entry(&db, &key, "  ", "text", Mood::Okay, at(10), &ReferenceFrame::utc());
        assert!(matches!(result, Err(AppError::Journal(_))));
    }

    #[test]
    fn test_read_entries_with_wrong_key_reports_failures() {
        let (_dir, db, key) = setup();
        add_entry(&db, &key, "alice", "secret", Mood::Bad, at(10), &ReferenceFrame::utc()).unwrap();

        let other_key = EntryKey::from_bytes([8u8; 32]);
        let views = read_entries(&db, &other_key, "alice").unwrap();
        assert_eq!(views[0].text, Err(DecodeFailure::Authentication));
        assert_eq!(views[0].display_text(), UNDECRYPTABLE_PLACEHOLDER);
    }

    #[test]
    fn test_delete_entry_of_other_owner_fails() {
        let (_dir, db, key) = setup();
        let entry = add_entry(&db, &key, "alice", "mine", Mood::Great, at(10), &ReferenceFrame::utc()).unwrap();

        let result = delete_entry(&db, "bob", &entry.id);
        assert!(matches!(
            result,
            Err(AppError::Database(DatabaseError::NotFound(_)))
        ));
        assert_eq!(read_entries(&db, &key, "alice").unwrap().len(), 1);
    }

    #[test]
    fn test_read_entries_surfaces_unknown_mood() {
        let (_dir, db, key) = setup();
        let sealed = encrypt("Written with the old picker", &key).unwrap();
        db.get_conn()
            .unwrap()
            .execute(
                "INSERT INTO entries (id, owner, cipher_text, mood, created_at, date_only) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params!["legacy", "alice", sealed.as_str(), "😢", "2024-05-10T09:00:00Z", "2024-05-10"],
            )
            .unwrap();

        let views = read_entries(&db, &key, "alice").unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].entry.id(), "legacy");
        assert!(views[0].entry.is_unreadable());
        assert_eq!(views[0].display_text(), "Written with the old picker");

        // The row can be removed by the id it is listed under
        delete_entry(&db, "alice", views[0].entry.id()).unwrap();
        assert!(read_entries(&db, &key, "alice").unwrap().is_empty());
    }
}

//! Entry CRUD operations.
//!
//! Every query is scoped by owner: a user can never read or delete another
//! user's entries through these functions.

use crate::analytics::MoodRecord;
use crate::crypto::CipherText;
use crate::errors::{AppResult, DatabaseError};
use crate::journal_core::{
    format_date_only, parse_date_only, JournalEntry, Mood, NewEntry, StoredEntry, UnreadableEntry,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use tracing::{debug, warn};
use uuid::Uuid;

/// Raw column values of one `entries` row.
struct EntryRow {
    id: String,
    owner: String,
    cipher_text: String,
    mood: String,
    created_at: String,
    date_only: String,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(EntryRow {
            id: row.get(0)?,
            owner: row.get(1)?,
            cipher_text: row.get(2)?,
            mood: row.get(3)?,
            created_at: row.get(4)?,
            date_only: row.get(5)?,
        })
    }

    /// Types the row, keeping its raw values when a metadata column is unreadable.
    fn into_stored(self) -> StoredEntry {
        let mood = self.mood.parse::<Mood>();
        let created_at = DateTime::parse_from_rfc3339(&self.created_at);
        let date_only = parse_date_only(&self.date_only);

        match (mood, created_at, date_only) {
            (Ok(mood), Ok(created_at), Ok(date_only)) => StoredEntry::Entry(JournalEntry {
                id: self.id,
                owner: self.owner,
                cipher_text: CipherText::new(self.cipher_text),
                mood,
                created_at: created_at.with_timezone(&Utc),
                date_only,
            }),
            (mood, created_at, date_only) => {
                warn!(
                    entry_id = %self.id,
                    mood_ok = mood.is_ok(),
                    created_at_ok = created_at.is_ok(),
                    date_only_ok = date_only.is_ok(),
                    "Entry has unreadable metadata"
                );
                StoredEntry::Unreadable(UnreadableEntry {
                    id: self.id,
                    owner: self.owner,
                    cipher_text: CipherText::new(self.cipher_text),
                    mood: self.mood,
                    created_at: self.created_at,
                    date_only: self.date_only,
                })
            }
        }
    }
}

const SELECT_COLUMNS: &str = "id, owner, cipher_text, mood, created_at, date_only";

/// Inserts a new entry and returns it with its store-assigned id.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `entry` - Encrypted entry with creation metadata
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn insert_entry(conn: &Connection, entry: NewEntry) -> AppResult<JournalEntry> {
    let id = Uuid::new_v4().to_string();
    debug!("Inserting entry {} for date {}", id, entry.date_only);

    conn.execute(
        r#"
        INSERT INTO entries (id, owner, cipher_text, mood, created_at, date_only)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            id,
            entry.owner,
            entry.cipher_text.as_str(),
            entry.mood.label(),
            entry.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            format_date_only(entry.date_only),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(JournalEntry {
        id,
        owner: entry.owner,
        cipher_text: entry.cipher_text,
        mood: entry.mood,
        created_at: entry.created_at,
        date_only: entry.date_only,
    })
}

/// Lists an owner's entries, newest first.
///
/// Rows with unreadable metadata are logged and returned as
/// `StoredEntry::Unreadable` rather than failing the whole listing.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection, owner: &str) -> AppResult<Vec<StoredEntry>> {
    debug!("Listing entries for owner");

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM entries WHERE owner = ?1 ORDER BY created_at DESC, id ASC",
            SELECT_COLUMNS
        ))
        .map_err(DatabaseError::Sqlite)?;

    let rows = stmt
        .query_map(params![owner], EntryRow::from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(rows.into_iter().map(EntryRow::into_stored).collect())
}

/// Retrieves one of an owner's entries by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if the owner has no entry with this id.
pub fn get_entry(conn: &Connection, owner: &str, id: &str) -> AppResult<Option<StoredEntry>> {
    debug!("Getting entry {}", id);

    let result = conn.query_row(
        &format!(
            "SELECT {} FROM entries WHERE owner = ?1 AND id = ?2",
            SELECT_COLUMNS
        ),
        params![owner, id],
        EntryRow::from_row,
    );

    match result {
        Ok(row) => Ok(Some(row.into_stored())),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Permanently deletes one of an owner's entries.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the owner has no entry with this id.
pub fn delete_entry(conn: &Connection, owner: &str, id: &str) -> AppResult<()> {
    debug!("Deleting entry {}", id);

    let deleted = conn
        .execute(
            "DELETE FROM entries WHERE owner = ?1 AND id = ?2",
            params![owner, id],
        )
        .map_err(DatabaseError::Sqlite)?;

    if deleted == 0 {
        return Err(DatabaseError::NotFound(format!("Entry with id {} not found", id)).into());
    }

    Ok(())
}

/// Returns the clear mood/date metadata of all an owner's entries.
///
/// Values are passed through unparsed; the analytics engine decides what
/// to do with malformed ones.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_mood_records(conn: &Connection, owner: &str) -> AppResult<Vec<MoodRecord>> {
    let mut stmt = conn
        .prepare("SELECT mood, date_only FROM entries WHERE owner = ?1")
        .map_err(DatabaseError::Sqlite)?;

    let records = stmt
        .query_map(params![owner], |row| {
            Ok(MoodRecord {
                mood: row.get(0)?,
                date_only: row.get(1)?,
            })
        })
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Loaded {} mood records", records.len());
    Ok(records)
}

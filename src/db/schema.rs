//! Database schema definitions and initialization.
//!
//! This module defines the SQLite schema for journal entries and community
//! posts. Entry text is only ever stored as ciphertext; mood and dates are
//! stored in the clear so statistics never need the key.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Tables
///
/// - `entries`: Encrypted journal entries with clear mood/date metadata
/// - `community_posts`: Posts attributed to a display name
/// - `schema_version`: Applied schema versions
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    // Entries table: one row per journal entry
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id TEXT PRIMARY KEY,
            owner TEXT NOT NULL,
            cipher_text TEXT NOT NULL,
            mood TEXT NOT NULL,
            created_at TEXT NOT NULL,
            date_only TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_owner_created
            ON entries(owner, created_at DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    // Community posts: counted by author display name
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS community_posts (
            id TEXT PRIMARY KEY,
            author TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_community_posts_author
            ON community_posts(author);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    // Schema version tracking table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    // Record schema version if not already recorded
    let current_version = get_schema_version(conn)?;
    if current_version.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [SCHEMA_VERSION],
        )
        .map_err(DatabaseError::Sqlite)?;
        info!("Initialized database schema version {}", SCHEMA_VERSION);
    } else {
        debug!("Schema version already recorded: {:?}", current_version);
    }

    debug!("Database tables created successfully");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `None` if the schema_version table doesn't exist or is empty.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than missing table.
pub fn get_schema_version(conn: &Connection) -> AppResult<Option<i32>> {
    let result = conn.query_row(
        "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
        [],
        |row| row.get(0),
    );

    match result {
        Ok(version) => Ok(Some(version)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) if e.to_string().contains("no such table") => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

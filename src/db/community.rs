//! Community post storage.
//!
//! Posts are public and attributed to a display name, not to an owner id.
//! Statistics only need the per-author count.

use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use tracing::debug;
use uuid::Uuid;

/// Inserts a community post and returns its id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn insert_post(
    conn: &Connection,
    author: &str,
    body: &str,
    created_at: DateTime<Utc>,
) -> AppResult<String> {
    let id = Uuid::new_v4().to_string();
    debug!("Inserting community post {}", id);

    conn.execute(
        "INSERT INTO community_posts (id, author, body, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            id,
            author,
            body,
            created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(id)
}

/// Counts posts attributed to `author`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn count_posts_by_author(conn: &Connection, author: &str) -> AppResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM community_posts WHERE author = ?1",
            params![author],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;

    u64::try_from(count)
        .map_err(|_| DatabaseError::Custom(format!("Negative post count {}", count)).into())
}

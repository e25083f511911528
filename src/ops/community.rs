//! Community posts.

use crate::db::{community, Database};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use tracing::info;

/// Publishes a community post under `author` and returns its id.
///
/// # Errors
///
/// Returns an error if the author or body is empty, or if database
/// operations fail.
pub fn publish_post(
    db: &Database,
    author: &str,
    body: &str,
    now: DateTime<Utc>,
) -> AppResult<String> {
    if author.trim().is_empty() {
        return Err(AppError::Journal("Post author cannot be empty".to_string()));
    }
    if body.trim().is_empty() {
        return Err(AppError::Journal("Post body cannot be empty".to_string()));
    }

    let conn = db.get_conn()?;
    let id = community::insert_post(&conn, author, body, now)?;
    info!(post_id = %id, "Community post published");
    Ok(id)
}

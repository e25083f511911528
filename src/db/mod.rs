//! Database operations for journal entries and community posts.
//!
//! This module provides SQLite storage for entry records (ciphertext plus clear
//! metadata) and for the community posts that stats cross-reference. It uses
//! connection pooling via r2d2 so concurrent handlers can each hold a
//! connection.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Owner-scoped entry CRUD
//! - `community`: Community post storage and author counts
//!
//! # Example
//!
//! ```no_run
//! use moodlog::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/moodlog.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod community;
pub mod entries;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Maximum number of pooled connections.
const POOL_MAX_SIZE: u32 = 5;

/// How long a connection waits on a locked database before failing, in milliseconds.
const BUSY_TIMEOUT_MS: u64 = 5_000;

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database at `db_path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(POOL_MAX_SIZE)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Test the connection
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool.get().map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

/// Connection customizer applying the busy timeout to each pooled connection.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}

//! `SQLite` database connection.
//!
//! The database is stored at `~/.memory-cue/memory-cue.db` (or under
//! `$MEMORY_CUE_HOME`) and contains tables for:
//! - Reminders
//! - Note folders
//! - Notes

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::MemoryCueError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, MemoryCueError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, MemoryCueError> {
        log::debug!("opening database {}", path.display());
        let conn = Connection::open(path).map_err(|e| {
            MemoryCueError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, MemoryCueError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            MemoryCueError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, MemoryCueError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;").map_err(|e| {
            MemoryCueError::Database(format!("Failed to enable foreign keys: {e}"))
        })?;

        let db = Self { conn };
        migrations::run(&db.conn)?;

        Ok(db)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, MemoryCueError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

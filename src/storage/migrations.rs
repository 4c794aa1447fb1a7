//! Database migrations for memory-cue.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::MemoryCueError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Folder every note without a destination lands in.
pub const UNSORTED_FOLDER: &str = "Unsorted";

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, MemoryCueError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| MemoryCueError::Database(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), MemoryCueError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| MemoryCueError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), MemoryCueError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        log::info!("migrating database to schema v{version}");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), MemoryCueError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(MemoryCueError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `reminders`: quick-add reminders
/// - `folders`: note folders, seeded with `Unsorted`
/// - `notes`: notes, optionally filed in a folder
fn migrate_v1(conn: &Connection) -> Result<(), MemoryCueError> {
    conn.execute_batch(&format!(
        r"
        CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            category TEXT NOT NULL,
            priority TEXT NOT NULL DEFAULT 'Medium',
            due TEXT,
            done INTEGER NOT NULL DEFAULT 0,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reminders_due
        ON reminders(due);

        CREATE TABLE IF NOT EXISTS folders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        INSERT OR IGNORE INTO folders (name) VALUES ('{UNSORTED_FOLDER}');

        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            folder_id INTEGER REFERENCES folders(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notes_folder
        ON notes(folder_id);
        ",
    ))
    .map_err(|e| MemoryCueError::Database(format!("Migration v1 failed: {e}")))
}

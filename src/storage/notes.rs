//! Note and folder storage.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use super::migrations::UNSORTED_FOLDER;
use super::reminders::{parse_timestamp, timestamp};
use super::Database;
use crate::error::MemoryCueError;
use crate::model::{Folder, Note};

/// Storage for notes and the folders they are filed in.
pub struct NoteStore<'db> {
    db: &'db Database,
}

impl<'db> NoteStore<'db> {
    #[must_use]
    pub const fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Get the folder called `name`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the database fails.
    pub fn ensure_folder(&self, name: &str) -> Result<Folder, MemoryCueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MemoryCueError::InvalidInput(
                "folder name cannot be empty".to_string(),
            ));
        }

        if let Some(folder) = self.find_folder(name)? {
            return Ok(folder);
        }

        self.db
            .connection()
            .execute("INSERT INTO folders (name) VALUES (?1)", [name])?;
        log::info!("created folder {name}");

        Ok(Folder {
            id: self.db.connection().last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Look up a folder by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_folder(&self, name: &str) -> Result<Option<Folder>, MemoryCueError> {
        Ok(self
            .db
            .connection()
            .query_row(
                "SELECT id, name FROM folders WHERE name = ?1",
                [name],
                row_to_folder,
            )
            .optional()?)
    }

    /// All folders, `Unsorted` first and the rest by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_folders(&self) -> Result<Vec<Folder>, MemoryCueError> {
        // Older databases may have lost it.
        self.ensure_folder(UNSORTED_FOLDER)?;

        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, name FROM folders ORDER BY name = ?1 DESC, name COLLATE NOCASE",
        )?;
        let folders = stmt
            .query_map([UNSORTED_FOLDER], row_to_folder)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(folders)
    }

    /// Create a note, optionally filed in a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty, the folder does not exist or
    /// the insert fails.
    pub fn create_note(
        &self,
        title: &str,
        body: &str,
        folder_id: Option<i64>,
    ) -> Result<Note, MemoryCueError> {
        if title.trim().is_empty() {
            return Err(MemoryCueError::InvalidInput(
                "note title cannot be empty".to_string(),
            ));
        }

        let conn = self.db.connection();
        if let Some(id) = folder_id {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM folders WHERE id = ?1)",
                [id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(MemoryCueError::NotFound(format!("folder {id}")));
            }
        }

        let now = Utc::now();
        conn.execute(
            r"INSERT INTO notes (title, body, folder_id, created_at, updated_at)
              VALUES (?1, ?2, ?3, ?4, ?4)",
            params![title, body, folder_id, timestamp(now)],
        )?;
        let id = conn.last_insert_rowid();
        log::info!("created note {id}");

        Ok(conn.query_row(
            "SELECT id, title, body, folder_id, created_at, updated_at FROM notes WHERE id = ?1",
            [id],
            row_to_note,
        )?)
    }

    /// Notes, newest first. `Some(folder_id)` restricts to one folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notes(&self, folder_id: Option<i64>) -> Result<Vec<Note>, MemoryCueError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            r"SELECT id, title, body, folder_id, created_at, updated_at FROM notes
              WHERE ?1 IS NULL OR folder_id = ?1
              ORDER BY updated_at DESC, id DESC",
        )?;
        let notes = stmt
            .query_map([folder_id], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }
}

fn row_to_folder(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        folder_id: row.get(3)?,
        created_at: parse_timestamp(row, 4)?,
        updated_at: parse_timestamp(row, 5)?,
    })
}

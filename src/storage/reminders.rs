//! Reminder storage.
//!
//! Persists quick-add reminders to the local database.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::MemoryCueError;
use crate::model::{ImportedReminder, Priority, Reminder};

/// Most reminders taken from a single import; the rest are dropped.
pub const IMPORT_LIMIT: usize = 500;

const COLUMNS: &str =
    "id, title, category, priority, due, done, notes, created_at, updated_at";

/// Fields needed to create a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub due: Option<DateTime<Utc>>,
    pub notes: String,
}

/// Storage for reminders.
pub struct ReminderStore<'db> {
    db: &'db Database,
}

impl<'db> ReminderStore<'db> {
    #[must_use]
    pub const fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Insert a reminder and return it with its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or the insert fails.
    pub fn create(&self, reminder: &NewReminder) -> Result<Reminder, MemoryCueError> {
        if reminder.title.trim().is_empty() {
            return Err(MemoryCueError::InvalidInput(
                "reminder title cannot be empty".to_string(),
            ));
        }

        let conn = self.db.connection();
        let now = timestamp(Utc::now());
        conn.execute(
            r"INSERT INTO reminders
              (title, category, priority, due, done, notes, created_at, updated_at)
              VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?6)",
            params![
                reminder.title,
                reminder.category,
                reminder.priority.as_str(),
                reminder.due.map(timestamp),
                reminder.notes,
                now,
            ],
        )
        .map_err(|e| MemoryCueError::Database(format!("Failed to insert reminder: {e}")))?;

        let id = conn.last_insert_rowid();
        log::info!("created reminder {id} in {}", reminder.category);
        self.get(id)
    }

    /// Get a reminder by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no reminder has this id.
    pub fn get(&self, id: i64) -> Result<Reminder, MemoryCueError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {COLUMNS} FROM reminders WHERE id = ?1"),
                [id],
                row_to_reminder,
            )
            .optional()?
            .ok_or_else(|| MemoryCueError::NotFound(format!("reminder {id}")))
    }

    /// List reminders in priority order, then due date (undated last), then
    /// most recently updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, include_done: bool) -> Result<Vec<Reminder>, MemoryCueError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM reminders WHERE ?1 OR done = 0"
            ))
            .map_err(|e| MemoryCueError::Database(format!("Failed to prepare query: {e}")))?;

        let mut reminders = stmt
            .query_map([include_done], row_to_reminder)?
            .collect::<Result<Vec<_>, _>>()?;
        reminders.sort_by(Reminder::smart_cmp);

        log::debug!("listed {} reminders", reminders.len());
        Ok(reminders)
    }

    /// Mark a reminder done or not done.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no reminder has this id.
    pub fn set_done(&self, id: i64, done: bool) -> Result<Reminder, MemoryCueError> {
        let changed = self.db.connection().execute(
            "UPDATE reminders SET done = ?1, updated_at = ?2 WHERE id = ?3",
            params![done, timestamp(Utc::now()), id],
        )?;
        if changed == 0 {
            return Err(MemoryCueError::NotFound(format!("reminder {id}")));
        }

        log::info!("reminder {id} done = {done}");
        self.get(id)
    }

    /// Delete a reminder.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no reminder has this id.
    pub fn delete(&self, id: i64) -> Result<(), MemoryCueError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM reminders WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(MemoryCueError::NotFound(format!("reminder {id}")));
        }

        log::info!("deleted reminder {id}");
        Ok(())
    }

    /// Insert up to [`IMPORT_LIMIT`] reminders in one transaction and return
    /// them.
    ///
    /// Every reminder gets a fresh id and current timestamps, so imports
    /// list ahead of older reminders of the same priority and due date.
    /// Items with a blank title are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails; nothing is imported then.
    pub fn import(&self, items: &[ImportedReminder]) -> Result<Vec<Reminder>, MemoryCueError> {
        if items.len() > IMPORT_LIMIT {
            log::warn!(
                "import has {} reminders, keeping the first {IMPORT_LIMIT}",
                items.len()
            );
        }

        let tx = self.db.connection().unchecked_transaction()?;
        let now = timestamp(Utc::now());
        let mut ids = Vec::new();
        for item in items.iter().take(IMPORT_LIMIT) {
            if item.title.trim().is_empty() {
                log::warn!("skipping imported reminder without a title");
                continue;
            }
            tx.execute(
                r"INSERT INTO reminders
                  (title, category, priority, due, done, notes, created_at, updated_at)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    item.title.trim(),
                    item.category,
                    item.priority.as_str(),
                    item.due.map(timestamp),
                    item.done,
                    item.notes,
                    now,
                ],
            )
            .map_err(|e| MemoryCueError::Database(format!("Failed to import reminder: {e}")))?;
            ids.push(tx.last_insert_rowid());
        }
        tx.commit()?;

        log::info!("imported {} reminders", ids.len());
        ids.into_iter().map(|id| self.get(id)).collect()
    }
}

pub(super) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_reminder(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    let priority: String = row.get(3)?;
    let due = match row.get::<_, Option<String>>(4)? {
        Some(_) => Some(parse_timestamp(row, 4)?),
        None => None,
    };

    Ok(Reminder {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        priority: priority
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
        due,
        done: row.get(5)?,
        notes: row.get(6)?,
        created_at: parse_timestamp(row, 7)?,
        updated_at: parse_timestamp(row, 8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_reminder(title: &str, priority: Priority, due_hour: Option<u32>) -> NewReminder {
        NewReminder {
            title: title.to_string(),
            category: "General".to_string(),
            priority,
            due: due_hour.map(|h| Utc.with_ymd_and_hms(2024, 5, 15, h, 0, 0).unwrap()),
            notes: String::new(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        let created = store
            .create(&new_reminder("mark reports", Priority::High, Some(16)))
            .unwrap();
        let loaded = store.get(created.id).unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.title, "mark reports");
        assert_eq!(loaded.priority, Priority::High);
        assert_eq!(
            loaded.due,
            Some(Utc.with_ymd_and_hms(2024, 5, 15, 16, 0, 0).unwrap())
        );
        assert!(!loaded.done);
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        let err = store
            .create(&new_reminder("   ", Priority::Low, None))
            .unwrap_err();
        assert!(matches!(err, MemoryCueError::InvalidInput(_)));
    }

    #[test]
    fn test_list_smart_order() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        store.create(&new_reminder("low", Priority::Low, Some(8))).unwrap();
        store.create(&new_reminder("undated", Priority::High, None)).unwrap();
        store.create(&new_reminder("late", Priority::High, Some(18))).unwrap();
        store.create(&new_reminder("early", Priority::High, Some(7))).unwrap();

        let titles: Vec<_> = store
            .list(false)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["early", "late", "undated", "low"]);
    }

    #[test]
    fn test_done_filtering() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        let a = store.create(&new_reminder("a", Priority::Medium, None)).unwrap();
        store.create(&new_reminder("b", Priority::Medium, None)).unwrap();

        assert!(store.set_done(a.id, true).unwrap().done);
        assert_eq!(store.list(false).unwrap().len(), 1);
        assert_eq!(store.list(true).unwrap().len(), 2);

        assert!(!store.set_done(a.id, false).unwrap().done);
        assert_eq!(store.list(false).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_ids() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        assert!(matches!(store.get(42), Err(MemoryCueError::NotFound(_))));
        assert!(matches!(
            store.set_done(42, true),
            Err(MemoryCueError::NotFound(_))
        ));
        assert!(matches!(store.delete(42), Err(MemoryCueError::NotFound(_))));
    }

    fn imported(title: &str) -> ImportedReminder {
        ImportedReminder {
            title: title.to_string(),
            category: "Admin".to_string(),
            priority: Priority::Medium,
            due: None,
            done: false,
            notes: String::new(),
        }
    }

    #[test]
    fn test_import_assigns_fresh_ids() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);
        let existing = store.create(&new_reminder("existing", Priority::Medium, None)).unwrap();

        let mut done = imported("  renew WWCC ");
        done.done = true;
        let added = store.import(&[done, imported(""), imported("order bibs")]).unwrap();

        assert_eq!(added.len(), 2);
        assert_eq!(added[0].title, "renew WWCC");
        assert!(added[0].done);
        assert!(added.iter().all(|r| r.id > existing.id));
        assert_ne!(added[0].id, added[1].id);
        assert_eq!(store.list(true).unwrap().len(), 3);
    }

    #[test]
    fn test_import_lists_ahead_of_older_reminders() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);
        let older = store.create(&new_reminder("older", Priority::Medium, None)).unwrap();
        db.connection()
            .execute(
                "UPDATE reminders SET updated_at = ?1 WHERE id = ?2",
                params!["2020-01-01T00:00:00.000Z", older.id],
            )
            .unwrap();

        store.import(&[imported("imported")]).unwrap();

        let titles: Vec<_> = store.list(true).unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["imported", "older"]);
    }

    #[test]
    fn test_import_is_capped() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        let items: Vec<_> = (0..IMPORT_LIMIT + 20)
            .map(|i| imported(&format!("item {i}")))
            .collect();
        let added = store.import(&items).unwrap();

        assert_eq!(added.len(), IMPORT_LIMIT);
        assert_eq!(added.last().unwrap().title, format!("item {}", IMPORT_LIMIT - 1));
        assert_eq!(store.list(true).unwrap().len(), IMPORT_LIMIT);
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let store = ReminderStore::new(&db);

        let created = store.create(&new_reminder("a", Priority::Medium, None)).unwrap();
        store.delete(created.id).unwrap();
        assert!(store.list(true).unwrap().is_empty());
    }
}

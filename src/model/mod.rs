//! Reminders, notes and folders as stored locally.

mod types;

pub use types::{Folder, ImportedReminder, Note, Priority, Reminder};

//! Storage layer for memory-cue.
//!
//! This module provides SQLite-based persistence for:
//! - Reminders
//! - Notes and their folders

mod database;
mod migrations;
mod notes;
mod reminders;

pub use database::Database;
pub use migrations::UNSORTED_FOLDER;
pub use notes::NoteStore;
pub use reminders::{NewReminder, ReminderStore, IMPORT_LIMIT};

//! Output formatting for memory-cue.
//!
//! This module provides formatters for displaying reminders, notes and
//! parser results in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::QuickWhen;
use crate::error::MemoryCueError;
use crate::features::nlp::{InboxQuery, QuickAddRoute};
use crate::model::{Folder, Note, Reminder};

pub use json::*;
pub use pretty::*;

/// Format reminders based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_reminders(
    reminders: &[Reminder],
    title: &str,
    format: OutputFormat,
) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_reminders_pretty(reminders, title)),
        OutputFormat::Json => format_reminders_json(reminders, title),
    }
}

/// Format a single reminder based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_reminder(reminder: &Reminder, format: OutputFormat) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_reminder_pretty(reminder)),
        OutputFormat::Json => to_json(reminder),
    }
}

/// Format notes based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_notes(
    notes: &[Note],
    folders: &[Folder],
    format: OutputFormat,
) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_notes_pretty(notes, folders)),
        OutputFormat::Json => format_notes_json(notes),
    }
}

/// Format folders based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_folders(folders: &[Folder], format: OutputFormat) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_folders_pretty(folders)),
        OutputFormat::Json => format_folders_json(folders),
    }
}

/// Format a resolved date/time based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_when(when: &QuickWhen, format: OutputFormat) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_when_pretty(when)),
        OutputFormat::Json => format_when_json(when),
    }
}

/// Format a quick-add route based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_route(route: &QuickAddRoute, format: OutputFormat) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_route_pretty(route)),
        OutputFormat::Json => to_json(route),
    }
}

/// Format inbox search results based on output format
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_search(
    query: &InboxQuery,
    reminders: &[Reminder],
    format: OutputFormat,
) -> Result<String, MemoryCueError> {
    match format {
        OutputFormat::Pretty => Ok(format_search_pretty(query, reminders)),
        OutputFormat::Json => format_search_json(query, reminders),
    }
}

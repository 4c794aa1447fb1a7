//! Reminder commands: `when`, `search`, `list`, `done`, `undone`, `remove`.

use chrono::Local;
use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::MemoryCueError;
use crate::output::{format_reminder, format_reminders, format_search, format_when, to_json};
use crate::storage::ReminderStore;

/// Resolve a phrase to a date and optional time.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn when(ctx: &Context, text: &str) -> Result<String, MemoryCueError> {
    let when = ctx.when_parser().parse(text, Local::now().naive_local());
    format_when(&when, ctx.format)
}

/// Search reminders with an inbox query.
///
/// # Errors
///
/// Returns an error if the database fails or output formatting fails.
pub fn search(ctx: &Context, query: &str, include_done: bool) -> Result<String, MemoryCueError> {
    let query = ctx.inbox_parser().parse(query, &Local::now());
    log::debug!("search query {query:?}");

    let db = ctx.open_database()?;
    let matches: Vec<_> = ReminderStore::new(&db)
        .list(include_done)?
        .into_iter()
        .filter(|reminder| reminder.matches(&query))
        .collect();

    format_search(&query, &matches, ctx.format)
}

/// List reminders, optionally limited to one category.
///
/// # Errors
///
/// Returns an error if the database fails or output formatting fails.
pub fn list(
    ctx: &Context,
    include_done: bool,
    category: Option<&str>,
) -> Result<String, MemoryCueError> {
    let db = ctx.open_database()?;
    let reminders: Vec<_> = ReminderStore::new(&db)
        .list(include_done)?
        .into_iter()
        .filter(|r| category.map_or(true, |c| r.category.eq_ignore_ascii_case(c)))
        .collect();

    format_reminders(&reminders, category.unwrap_or("Reminders"), ctx.format)
}

/// Mark a reminder done or not done.
///
/// # Errors
///
/// Returns `NotFound` if the reminder does not exist.
pub fn set_done(ctx: &Context, id: i64, done: bool) -> Result<String, MemoryCueError> {
    let db = ctx.open_database()?;
    let reminder = ReminderStore::new(&db).set_done(id, done)?;
    format_reminder(&reminder, ctx.format)
}

/// Delete a reminder.
///
/// # Errors
///
/// Returns `NotFound` if the reminder does not exist.
pub fn remove(ctx: &Context, id: i64) -> Result<String, MemoryCueError> {
    let db = ctx.open_database()?;
    ReminderStore::new(&db).delete(id)?;

    match ctx.format {
        OutputFormat::Pretty => Ok(format!("{} reminder {id}", "Removed".red().bold())),
        OutputFormat::Json => to_json(&json!({ "removed": id })),
    }
}

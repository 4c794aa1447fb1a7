//! Quick add command implementation.
//!
//! This module implements the `memory-cue add` command: route the text to a
//! reminder or a note and save it.

use chrono::Local;
use colored::Colorize;

use super::Context;
use crate::cli::args::{OutputFormat, QuickAddArgs};
use crate::core::local_to_utc;
use crate::error::MemoryCueError;
use crate::features::nlp::{route_quick_add, QuickAddRoute};
use crate::output::{format_reminder, format_route, to_json};
use crate::storage::{NewReminder, NoteStore, ReminderStore};

/// Execute the quick add command.
///
/// # Errors
///
/// Returns an error if the text is blank or saving fails.
pub fn quick_add(ctx: &Context, args: QuickAddArgs) -> Result<String, MemoryCueError> {
    let text = args.text.join(" ");
    if text.trim().is_empty() {
        return Err(MemoryCueError::InvalidInput(
            "nothing to add: the text is empty".to_string(),
        ));
    }

    let now = Local::now().naive_local();
    let mut route = route_quick_add(&text, now, &ctx.config.quick_add, &ctx.when_parser());

    if let QuickAddRoute::Reminder(draft) = &mut route {
        if let Some(category) = args.category {
            draft.category = category;
        }
        if let Some(priority) = args.priority {
            draft.priority = priority;
        }
    }

    if args.parse_only {
        return format_route(&route, ctx.format);
    }

    let db = ctx.open_database()?;
    match route {
        QuickAddRoute::Reminder(draft) => {
            let reminder = ReminderStore::new(&db).create(&NewReminder {
                title: draft.title,
                category: draft.category,
                priority: draft.priority,
                due: draft.due.map(|due| local_to_utc(&Local, due)),
                notes: String::new(),
            })?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!(
                    "{} {}",
                    "Added".green().bold(),
                    format_reminder(&reminder, ctx.format)?
                )),
                OutputFormat::Json => format_reminder(&reminder, ctx.format),
            }
        },
        QuickAddRoute::Note(draft) => {
            let store = NoteStore::new(&db);
            let folder = store.ensure_folder(&draft.folder)?;
            let note = store.create_note(&draft.title, "", Some(folder.id))?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!(
                    "{} note {} to {}",
                    "Saved".green().bold(),
                    note.title.bold(),
                    folder.name.cyan()
                )),
                OutputFormat::Json => to_json(&note),
            }
        },
    }
}

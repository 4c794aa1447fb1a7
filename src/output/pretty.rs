use chrono::{DateTime, Local, Utc};
use colored::Colorize;

use crate::core::QuickWhen;
use crate::features::nlp::{InboxQuery, QuickAddRoute};
use crate::model::{Folder, Note, Priority, Reminder};

fn local_due(due: DateTime<Utc>) -> String {
    due.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn priority_badge(priority: Priority) -> String {
    match priority {
        Priority::High => "!high".red().to_string(),
        Priority::Medium => "!medium".yellow().to_string(),
        Priority::Low => "!low".dimmed().to_string(),
    }
}

fn reminder_line(reminder: &Reminder) -> String {
    let icon = if reminder.done {
        "[x]".green()
    } else {
        "[ ]".white()
    };
    let title = if reminder.done {
        reminder.title.strikethrough().to_string()
    } else {
        reminder.title.bold().to_string()
    };

    let mut line = format!(
        "{} {} {}  {}",
        format!("{:>4}", reminder.id).dimmed(),
        icon,
        title,
        priority_badge(reminder.priority)
    );
    if let Some(due) = reminder.due {
        line.push_str(&format!("  {}", local_due(due).yellow()));
    }
    line
}

/// Format reminders grouped under their category headings.
///
/// Groups appear in the order their first reminder does, so a sorted list
/// stays sorted inside each group.
pub fn format_reminders_pretty(reminders: &[Reminder], title: &str) -> String {
    if reminders.is_empty() {
        return format!("{title} (0 items)\n  No reminders");
    }

    let mut groups: Vec<(&str, Vec<&Reminder>)> = Vec::new();
    for reminder in reminders {
        match groups.iter_mut().find(|(name, _)| *name == reminder.category) {
            Some((_, items)) => items.push(reminder),
            None => groups.push((&reminder.category, vec![reminder])),
        }
    }

    let mut output = format!("{title} ({} items)\n", reminders.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (category, items) in groups {
        output.push_str(&format!("{}\n", category.cyan().bold()));
        for reminder in items {
            output.push_str(&format!("  {}\n", reminder_line(reminder)));
        }
    }

    output
}

/// Format a single reminder with all its fields.
pub fn format_reminder_pretty(reminder: &Reminder) -> String {
    let mut output = format!("{}\n", reminder_line(reminder));
    output.push_str(&format!("  {}: {}\n", "Category".dimmed(), reminder.category));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), reminder.priority));

    if let Some(due) = reminder.due {
        output.push_str(&format!("  {}: {}\n", "Due".dimmed(), local_due(due)));
    }

    if !reminder.notes.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), reminder.notes));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        reminder.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format notes, showing the folder name when known.
pub fn format_notes_pretty(notes: &[Note], folders: &[Folder]) -> String {
    if notes.is_empty() {
        return "Notes (0)\n  No notes".to_string();
    }

    let mut output = format!("Notes ({})\n", notes.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for note in notes {
        let folder = note
            .folder_id
            .and_then(|id| folders.iter().find(|f| f.id == id))
            .map_or("Unsorted", |f| f.name.as_str());
        output.push_str(&format!(
            "{} {}  {}\n",
            format!("{:>4}", note.id).dimmed(),
            note.title.bold(),
            folder.dimmed()
        ));
        if !note.body.is_empty() {
            output.push_str(&format!("       {}\n", note.body));
        }
    }

    output
}

/// Format the folder list.
pub fn format_folders_pretty(folders: &[Folder]) -> String {
    if folders.is_empty() {
        return "Folders (0)\n  No folders".to_string();
    }

    let mut output = format!("Folders ({})\n", folders.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for folder in folders {
        output.push_str(&format!("  {}\n", folder.name));
    }

    output
}

/// Format a resolved date and optional time.
pub fn format_when_pretty(when: &QuickWhen) -> String {
    let time = when.time_hm();
    if time.is_empty() {
        format!("{}  {}", when.date_iso().yellow(), "(no time)".dimmed())
    } else {
        format!("{} {}", when.date_iso().yellow(), time.yellow())
    }
}

/// Format where a quick-add entry would go.
pub fn format_route_pretty(route: &QuickAddRoute) -> String {
    match route {
        QuickAddRoute::Reminder(draft) => {
            let mut output = format!("{} {}\n", "Reminder".green().bold(), draft.title.bold());
            output.push_str(&format!("  {}: {}\n", "Category".dimmed(), draft.category));
            output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), draft.priority));
            if let Some(due) = draft.due {
                output.push_str(&format!(
                    "  {}: {}\n",
                    "Due".dimmed(),
                    due.format("%Y-%m-%d %H:%M")
                ));
            }
            output
        },
        QuickAddRoute::Note(draft) => {
            let mut output = format!("{} {}\n", "Note".blue().bold(), draft.title.bold());
            output.push_str(&format!("  {}: {}\n", "Folder".dimmed(), draft.folder));
            output
        },
    }
}

/// Format the results of an inbox search with a summary of the query.
pub fn format_search_pretty(query: &InboxQuery, reminders: &[Reminder]) -> String {
    let mut header = String::from("Search");
    if !query.keyword_query.is_empty() {
        header.push_str(&format!(" \"{}\"", query.keyword_query));
    }
    if let Some(range) = query.time_range {
        let bound = |ms: i64| {
            DateTime::<Utc>::from_timestamp_millis(ms)
                .map_or_else(|| ms.to_string(), local_due)
        };
        header.push_str(&format!(" [{} → {})", bound(range.start()), bound(range.end())));
    }

    format_reminders_pretty(reminders, &header)
}

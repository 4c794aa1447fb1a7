//! Reminder backup commands: `export` and `import`.
//!
//! Exports are a pretty-printed JSON array of reminders. Imports accept the
//! same array; ids in the file are ignored.

use std::fs;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::MemoryCueError;
use crate::model::ImportedReminder;
use crate::output::to_json;
use crate::storage::ReminderStore;

/// Export every reminder, done or not.
///
/// Without a file the array itself is the output, whatever the format.
///
/// # Errors
///
/// Returns an error if the database fails or the file cannot be written.
pub fn export(ctx: &Context, file: Option<&Path>) -> Result<String, MemoryCueError> {
    let db = ctx.open_database()?;
    let reminders = ReminderStore::new(&db).list(true)?;
    let body = serde_json::to_string_pretty(&reminders)?;

    let Some(file) = file else {
        return Ok(body);
    };
    fs::write(file, body + "\n")?;
    log::info!("exported {} reminders to {}", reminders.len(), file.display());

    match ctx.format {
        OutputFormat::Pretty => Ok(format!(
            "{} {} reminders to {}",
            "Exported".green().bold(),
            reminders.len(),
            file.display()
        )),
        OutputFormat::Json => to_json(&json!({
            "exported": reminders.len(),
            "file": file.display().to_string(),
        })),
    }
}

/// Import reminders from a JSON array written by [`export`].
///
/// Reminders without a category land in the default category.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a JSON array of
/// reminders, or the database fails.
pub fn import(ctx: &Context, file: &Path) -> Result<String, MemoryCueError> {
    let raw = fs::read_to_string(file)?;
    let mut items = parse_items(&raw).map_err(|e| {
        MemoryCueError::InvalidInput(format!(
            "{} is not a JSON array of reminders: {e}",
            file.display()
        ))
    })?;
    for item in &mut items {
        if item.category.trim().is_empty() {
            item.category.clone_from(&ctx.config.quick_add.default_category);
        }
    }

    let db = ctx.open_database()?;
    let imported = ReminderStore::new(&db).import(&items)?;
    let count = imported.len();

    match ctx.format {
        OutputFormat::Pretty => Ok(format!(
            "{} {count} reminders from {}",
            "Imported".green().bold(),
            file.display()
        )),
        OutputFormat::Json => to_json(&json!({
            "imported": count,
            "items": imported,
        })),
    }
}

fn parse_items(raw: &str) -> Result<Vec<ImportedReminder>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::context;
    use crate::model::Priority;
    use crate::storage::{NewReminder, IMPORT_LIMIT};
    use serde_json::Value;

    fn seed(ctx: &Context, title: &str) {
        let db = ctx.open_database().unwrap();
        ReminderStore::new(&db)
            .create(&NewReminder {
                title: title.to_string(),
                category: "Admin".to_string(),
                priority: Priority::High,
                due: None,
                notes: "bring forms".to_string(),
            })
            .unwrap();
    }

    #[test]
    fn test_export_without_file_prints_array() {
        let (_dir, ctx) = context(OutputFormat::Pretty);
        seed(&ctx, "email parents");

        let parsed: Value = serde_json::from_str(&export(&ctx, None).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["title"], "email parents");
        assert_eq!(parsed[0]["notes"], "bring forms");
    }

    #[test]
    fn test_export_then_import_elsewhere() {
        let (dir, source) = context(OutputFormat::Json);
        seed(&source, "email parents");
        seed(&source, "order bibs");
        let file = dir.path().join("backup.json");

        let summary: Value = serde_json::from_str(&export(&source, Some(&file)).unwrap()).unwrap();
        assert_eq!(summary["exported"], 2);

        let (_other, target) = context(OutputFormat::Json);
        seed(&target, "already here");
        let summary: Value = serde_json::from_str(&import(&target, &file).unwrap()).unwrap();
        assert_eq!(summary["imported"], 2);
        assert_eq!(summary["items"][0]["category"], "Admin");
        assert_eq!(summary["items"][0]["priority"], "High");

        let db = target.open_database().unwrap();
        let all = ReminderStore::new(&db).list(true).unwrap();
        assert_eq!(all.len(), 3);
        let mut ids: Vec<_> = all.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_import_fills_default_category_and_caps() {
        let (dir, ctx) = context(OutputFormat::Json);
        let items: Vec<Value> = (0..IMPORT_LIMIT + 5)
            .map(|i| json!({ "id": "x", "title": format!("item {i}") }))
            .collect();
        let file = dir.path().join("big.json");
        fs::write(&file, serde_json::to_string(&items).unwrap()).unwrap();

        let summary: Value = serde_json::from_str(&import(&ctx, &file).unwrap()).unwrap();
        assert_eq!(summary["imported"], IMPORT_LIMIT);
        assert_eq!(summary["items"][0]["category"], "General");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let (dir, ctx) = context(OutputFormat::Pretty);
        let file = dir.path().join("bad.json");
        fs::write(&file, r#"{"title": "not a list"}"#).unwrap();

        let err = import(&ctx, &file).unwrap_err();
        assert!(matches!(err, MemoryCueError::InvalidInput(_)));
    }

    #[test]
    fn test_import_empty_file() {
        let (dir, ctx) = context(OutputFormat::Pretty);
        let file = dir.path().join("empty.json");
        fs::write(&file, "").unwrap();

        let out = import(&ctx, &file).unwrap();
        assert!(out.contains("0 reminders"));
    }
}

//! JSON output formatting for memory-cue.

use serde::Serialize;
use serde_json::json;

use crate::core::QuickWhen;
use crate::error::MemoryCueError;
use crate::features::nlp::InboxQuery;
use crate::model::{Folder, Note, Reminder};

/// Format reminders as JSON
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_reminders_json(reminders: &[Reminder], list_name: &str) -> Result<String, MemoryCueError> {
    let output = json!({
        "list": list_name,
        "count": reminders.len(),
        "items": reminders
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format notes as JSON
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_notes_json(notes: &[Note]) -> Result<String, MemoryCueError> {
    let output = json!({
        "count": notes.len(),
        "items": notes
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format folders as JSON
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_folders_json(folders: &[Folder]) -> Result<String, MemoryCueError> {
    let output = json!({
        "count": folders.len(),
        "items": folders
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a resolved date/time as `{"date": ..., "time": ...}`
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_when_json(when: &QuickWhen) -> Result<String, MemoryCueError> {
    to_json(when)
}

/// Format search results together with the parsed query
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn format_search_json(query: &InboxQuery, reminders: &[Reminder]) -> Result<String, MemoryCueError> {
    let output = json!({
        "query": query,
        "count": reminders.len(),
        "items": reminders
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `MemoryCueError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, MemoryCueError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeRange;
    use crate::model::Priority;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use serde_json::Value;

    fn make_reminder(title: &str) -> Reminder {
        let at = Utc.with_ymd_and_hms(2024, 5, 15, 9, 0, 0).unwrap();
        Reminder {
            id: 1,
            title: title.to_string(),
            category: "General".to_string(),
            priority: Priority::High,
            due: Some(at),
            done: false,
            notes: String::new(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_format_reminders_json() {
        let output = format_reminders_json(&[make_reminder("mark reports")], "Reminders").unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["list"], "Reminders");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["title"], "mark reports");
        assert_eq!(parsed["items"][0]["priority"], "High");
        assert!(parsed["items"][0]["createdAt"].is_string());
    }

    #[test]
    fn test_format_when_json() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
        let with_time = QuickWhen::with_time(date, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        let parsed: Value = serde_json::from_str(&format_when_json(&with_time).unwrap()).unwrap();
        assert_eq!(parsed["date"], "2025-09-14");
        assert_eq!(parsed["time"], "16:00");

        let date_only: Value =
            serde_json::from_str(&format_when_json(&QuickWhen::date_only(date)).unwrap()).unwrap();
        assert_eq!(date_only["time"], "");
    }

    #[test]
    fn test_format_search_json() {
        let query = InboxQuery {
            keyword_query: String::new(),
            time_range: TimeRange::new(1_000, 2_000),
        };
        let output = format_search_json(&query, &[]).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["query"]["keywordQuery"], "");
        assert_eq!(parsed["query"]["timeRange"]["start"], 1_000);
        assert_eq!(parsed["query"]["timeRange"]["end"], 2_000);
        assert_eq!(parsed["count"], 0);
    }

    #[test]
    fn test_format_folders_json_empty() {
        let parsed: Value = serde_json::from_str(&format_folders_json(&[]).unwrap()).unwrap();
        assert_eq!(parsed["count"], 0);
        assert!(parsed["items"].as_array().unwrap().is_empty());
    }
}

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MemoryCueError;
use crate::features::nlp::InboxQuery;

/// Reminder priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort weight, higher first.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = MemoryCueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(MemoryCueError::InvalidInput(format!(
                "unknown priority '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Whether this reminder passes an inbox query.
    ///
    /// The keyword is matched against title, category and notes. A time range
    /// additionally requires a due date inside it.
    #[must_use]
    pub fn matches(&self, query: &InboxQuery) -> bool {
        let keyword = query.keyword_query.as_str();
        let keyword_ok = keyword.is_empty()
            || [&self.title, &self.category, &self.notes]
                .iter()
                .any(|field| field.to_lowercase().contains(keyword));

        let range_ok = query.time_range.map_or(true, |range| {
            self.due
                .is_some_and(|due| range.contains(due.timestamp_millis()))
        });

        keyword_ok && range_ok
    }

    /// List order: priority, then due date (undated last), then most
    /// recently updated.
    #[must_use]
    pub fn smart_cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .weight()
            .cmp(&self.priority.weight())
            .then_with(|| match (self.due, other.due) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| other.updated_at.cmp(&self.updated_at))
    }
}

/// A reminder read from an export file.
///
/// Accepts the exported [`Reminder`] shape. Ids and timestamps are ignored;
/// only `title` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedReminder {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeRange;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, h, 0, 0).unwrap()
    }

    fn reminder(title: &str, priority: Priority, due: Option<DateTime<Utc>>) -> Reminder {
        Reminder {
            id: 1,
            title: title.to_string(),
            category: "Admin".to_string(),
            priority,
            due,
            done: false,
            notes: String::new(),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn query(keyword: &str, range: Option<TimeRange>) -> InboxQuery {
        InboxQuery {
            keyword_query: keyword.to_string(),
            time_range: range,
        }
    }

    #[test]
    fn test_priority_parse_and_display() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(Priority::Low.to_string(), "Low");
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_imported_reminder_defaults() {
        let items: Vec<ImportedReminder> = serde_json::from_str(
            r#"[
                {"id": "k3x9", "title": "email parents", "priority": "High",
                 "due": "2024-05-16T06:00:00.000Z", "done": true, "createdAt": 5},
                {"title": "order bibs", "due": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[0].due, Some(at(6) + chrono::Duration::days(1)));
        assert!(items[0].done);
        assert_eq!(items[1].category, "");
        assert_eq!(items[1].priority, Priority::Medium);
        assert_eq!(items[1].due, None);

        assert!(serde_json::from_str::<ImportedReminder>(r#"{"category": "x"}"#).is_err());
    }

    #[test]
    fn test_matches_keyword() {
        let r = reminder("Mark Reports", Priority::Medium, None);
        assert!(r.matches(&query("mark", None)));
        assert!(r.matches(&query("admin", None)));
        assert!(r.matches(&query("", None)));
        assert!(!r.matches(&query("footy", None)));
    }

    #[test]
    fn test_matches_time_range() {
        let range = TimeRange::new(at(9).timestamp_millis(), at(10).timestamp_millis());
        let inside = reminder("a", Priority::Medium, Some(at(9)));
        let outside = reminder("a", Priority::Medium, Some(at(10)));
        let undated = reminder("a", Priority::Medium, None);

        assert!(inside.matches(&query("", range)));
        assert!(!outside.matches(&query("", range)));
        assert!(!undated.matches(&query("", range)));
    }

    #[test]
    fn test_smart_order() {
        let mut items = vec![
            reminder("low", Priority::Low, Some(at(1))),
            reminder("undated", Priority::High, None),
            reminder("late", Priority::High, Some(at(5))),
            reminder("early", Priority::High, Some(at(2))),
        ];
        items.sort_by(Reminder::smart_cmp);
        let titles: Vec<_> = items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late", "undated", "low"]);
    }
}

//! Quick-add intent routing.
//!
//! A leading prefix decides where an entry goes:
//!
//! | Prefix         | Destination                         |
//! |----------------|-------------------------------------|
//! | `footy drill:` | reminder in the footy drill category |
//! | `task:`        | reminder in the task category        |
//! | `reflection:`  | note in the reflections folder       |
//!
//! Anything else becomes a reminder whose category is inferred.

use chrono::NaiveDateTime;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::metadata::extract_metadata;
use super::normalize::{collapse_whitespace, excise};
use super::when::QuickWhenParser;
use crate::config::QuickAddConfig;
use crate::model::Priority;

static PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(footy\s+drill|task|reflection)\s*:")
        .unwrap_or_else(|e| panic!("Invalid prefix regex: {e}"))
});

/// A recognised quick-add prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    FootyDrill,
    Task,
    Reflection,
}

impl PrefixKind {
    /// Detect a prefix at the start of `text`, returning it with the byte
    /// offset where the body begins.
    #[must_use]
    pub fn detect(text: &str) -> Option<(Self, usize)> {
        let caps = PREFIX.captures(text)?;
        let word = collapse_whitespace(caps.get(1)?.as_str()).to_lowercase();
        let kind = match word.as_str() {
            "footy drill" => Self::FootyDrill,
            "task" => Self::Task,
            "reflection" => Self::Reflection,
            _ => return None,
        };
        Some((kind, caps.get(0)?.end()))
    }
}

/// A reminder ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    /// Local wall-clock due time. Only set when a time was found.
    pub due: Option<NaiveDateTime>,
}

/// A note ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub folder: String,
}

/// Where a quick-add entry goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "destination", rename_all = "lowercase")]
pub enum QuickAddRoute {
    Reminder(ReminderDraft),
    Note(NoteDraft),
}

/// Classify `text` and build the draft for its destination.
///
/// Any standalone one- or two-digit number counts as an hour: `"buy 2
/// apples"` is due today at 02:00 with the title `"buy apples"`. Spell the
/// number out (`"two"`) to keep it in the title.
#[must_use]
pub fn route_quick_add(
    text: &str,
    now: NaiveDateTime,
    config: &QuickAddConfig,
    parser: &QuickWhenParser,
) -> QuickAddRoute {
    let prefix = PrefixKind::detect(text);
    let body = prefix.map_or(text, |(_, end)| &text[end..]).trim();
    debug!("quick-add prefix {:?}, body {body:?}", prefix.map(|(kind, _)| kind));

    if matches!(prefix, Some((PrefixKind::Reflection, _))) {
        let title = non_empty_or(collapse_whitespace(body), text);
        return QuickAddRoute::Note(NoteDraft {
            title,
            folder: config.reflections_folder.clone(),
        });
    }

    let metadata = extract_metadata(body);
    let category = match prefix {
        Some((PrefixKind::FootyDrill, _)) => config.footy_drill_category.clone(),
        Some((PrefixKind::Task, _)) => config.task_category.clone(),
        _ => metadata
            .category
            .clone()
            .or_else(|| infer_category(&metadata.text, config))
            .unwrap_or_else(|| config.default_category.clone()),
    };

    let resolution = parser.resolve(&metadata.text, now);
    let (title, due) = match resolution.when.to_datetime() {
        Some(due) => {
            let stripped = collapse_whitespace(&excise(&metadata.text, &resolution.consumed));
            (non_empty_or(stripped, &metadata.text), Some(due))
        },
        None => (non_empty_or(metadata.text.clone(), text), None),
    };

    QuickAddRoute::Reminder(ReminderDraft {
        title,
        category,
        priority: metadata.priority.unwrap_or(config.default_priority),
        due,
    })
}

/// First configured category with a keyword present in `text` as whole words.
fn infer_category(text: &str, config: &QuickAddConfig) -> Option<String> {
    let words = tokens(text);
    config
        .category_keywords
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|keyword| {
                let needle = tokens(keyword);
                !needle.is_empty() && words.windows(needle.len()).any(|w| w == needle.as_slice())
            })
        })
        .map(|(category, _)| category.clone())
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty_or(candidate: String, fallback: &str) -> String {
    if candidate.trim().is_empty() {
        fallback.trim().to_string()
    } else {
        candidate
    }
}

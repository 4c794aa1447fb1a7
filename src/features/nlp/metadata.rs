//! Inline quick-add metadata: `!high`, `!medium`, `!low` and `#category`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::collapse_whitespace;
use crate::model::Priority;

static PRIORITY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)!(high|medium|low)\b")
        .unwrap_or_else(|e| panic!("Invalid priority regex: {e}"))
});

static CATEGORY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)#([\w-]+)").unwrap_or_else(|e| panic!("Invalid category regex: {e}"))
});

/// Metadata pulled out of quick-add text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddMetadata {
    /// Text with the tokens removed. Falls back to the trimmed input when
    /// nothing else is left.
    pub text: String,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

/// Extract the first priority and category tokens from `raw`.
#[must_use]
pub fn extract_metadata(raw: &str) -> QuickAddMetadata {
    let mut text = raw.to_string();

    let priority_hit = PRIORITY_TOKEN.captures(&text).and_then(|caps| {
        Some((caps.get(0)?.range(), caps.get(1)?.as_str().parse::<Priority>().ok()))
    });
    let priority = priority_hit.and_then(|(span, value)| {
        text.replace_range(span, " ");
        value
    });

    let category_hit = CATEGORY_TOKEN
        .captures(&text)
        .and_then(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())));
    let category = category_hit.map(|(span, name)| {
        text.replace_range(span, " ");
        name
    });

    let mut text = collapse_whitespace(&text);
    if text.is_empty() {
        text = raw.trim().to_string();
    }

    QuickAddMetadata {
        text,
        priority,
        category,
    }
}

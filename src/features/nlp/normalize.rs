//! Relative-phrase table and text helpers shared by the parsers.
//!
//! Phrases are matched case-insensitively against the original text so that
//! byte offsets stay valid for removing matches from titles later on.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Language a relative phrase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
}

/// A relative date phrase and how many days after the reference date it
/// points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativePhrase {
    /// Phrase text, lowercase. Words are separated by single spaces.
    pub phrase: &'static str,
    pub language: Language,
    pub day_offset: i64,
}

/// Recognised relative phrases, in priority order.
///
/// The first phrase found anywhere in the text wins, so every "today" form
/// is checked before any "tomorrow" form, and so on.
pub const RELATIVE_PHRASES: &[RelativePhrase] = &[
    RelativePhrase { phrase: "today", language: Language::English, day_offset: 0 },
    RelativePhrase { phrase: "hoy", language: Language::Spanish, day_offset: 0 },
    RelativePhrase { phrase: "aujourd'hui", language: Language::French, day_offset: 0 },
    RelativePhrase { phrase: "aujourd\u{2019}hui", language: Language::French, day_offset: 0 },
    RelativePhrase { phrase: "tomorrow", language: Language::English, day_offset: 1 },
    RelativePhrase { phrase: "mañana", language: Language::Spanish, day_offset: 1 },
    RelativePhrase { phrase: "manana", language: Language::Spanish, day_offset: 1 },
    RelativePhrase { phrase: "demain", language: Language::French, day_offset: 1 },
    RelativePhrase { phrase: "next week", language: Language::English, day_offset: 7 },
    RelativePhrase { phrase: "próxima semana", language: Language::Spanish, day_offset: 7 },
    RelativePhrase { phrase: "semaine prochaine", language: Language::French, day_offset: 7 },
];

struct CompiledPhrase {
    phrase: &'static RelativePhrase,
    pattern: Regex,
}

static COMPILED_PHRASES: Lazy<Vec<CompiledPhrase>> = Lazy::new(|| {
    RELATIVE_PHRASES
        .iter()
        .map(|phrase| CompiledPhrase {
            phrase,
            pattern: phrase_pattern(phrase.phrase),
        })
        .collect()
});

fn phrase_pattern(phrase: &str) -> Regex {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i)\b{body}\b"))
        .unwrap_or_else(|e| panic!("Invalid phrase regex for '{phrase}': {e}"))
}

/// A relative phrase found in some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    pub span: Range<usize>,
    pub phrase: &'static RelativePhrase,
}

/// Find the highest-priority relative phrase in `text`.
#[must_use]
pub fn find_relative_phrase(text: &str) -> Option<PhraseMatch> {
    COMPILED_PHRASES.iter().find_map(|compiled| {
        compiled.pattern.find(text).map(|m| PhraseMatch {
            span: m.range(),
            phrase: compiled.phrase,
        })
    })
}

/// Working text threaded through parser stages.
///
/// Consuming a span blanks it with spaces of the same byte length, so offsets
/// into the original text stay valid and a consumed match can never be seen
/// by a later stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remaining {
    text: String,
    consumed: Vec<Range<usize>>,
}

impl Remaining {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            consumed: Vec::new(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Spans consumed so far, in consumption order.
    #[must_use]
    pub fn consumed(&self) -> &[Range<usize>] {
        &self.consumed
    }

    /// Return a copy with `span` consumed.
    ///
    /// Spans that do not fall on character boundaries are ignored.
    #[must_use]
    pub fn consume(&self, span: Range<usize>) -> Self {
        if span.is_empty() || self.text.get(span.clone()).is_none() {
            return self.clone();
        }

        let mut text = self.text.clone();
        text.replace_range(span.clone(), &" ".repeat(span.len()));
        let mut consumed = self.consumed.clone();
        consumed.push(span);
        Self { text, consumed }
    }
}

/// Remove `spans` from `text`, leaving a space where each one was.
#[must_use]
pub fn excise(text: &str, spans: &[Range<usize>]) -> String {
    let mut remaining = Remaining::new(text);
    for span in spans {
        remaining = remaining.consume(span.clone());
    }
    remaining.text
}

/// Collapse runs of whitespace into single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize search text: collapsed whitespace, lowercase.
#[must_use]
pub fn normalize_query(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_english_phrases() {
        let m = find_relative_phrase("call mum Tomorrow at 5").unwrap();
        assert_eq!(m.phrase.day_offset, 1);
        assert_eq!(&"call mum Tomorrow at 5"[m.span], "Tomorrow");

        let m = find_relative_phrase("plan next   week").unwrap();
        assert_eq!(m.phrase.day_offset, 7);
        assert_eq!(m.span, 5..16);
    }

    #[test]
    fn test_find_spanish_and_french() {
        let m = find_relative_phrase("MAÑANA 8:30").unwrap();
        assert_eq!(m.phrase.language, Language::Spanish);
        assert_eq!(m.span, 0..7);

        let m = find_relative_phrase("réunion aujourd\u{2019}hui").unwrap();
        assert_eq!(m.phrase.day_offset, 0);
        assert_eq!(m.phrase.language, Language::French);

        let m = find_relative_phrase("demain 20h").unwrap();
        assert_eq!(m.phrase.phrase, "demain");
    }

    #[test]
    fn test_priority_order_beats_position() {
        let m = find_relative_phrase("tomorrow or today").unwrap();
        assert_eq!(m.phrase.phrase, "today");
    }

    #[test]
    fn test_word_boundaries() {
        assert!(find_relative_phrase("todays agenda").is_none());
        assert!(find_relative_phrase("hoyden").is_none());
    }

    #[test]
    fn test_remaining_preserves_offsets() {
        let text = "mañana 8:30";
        let r = Remaining::new(text).consume(0..7);
        assert_eq!(r.as_str().len(), text.len());
        assert_eq!(&r.as_str()[8..], "8:30");
        assert_eq!(r.consumed(), &[0..7]);
    }

    #[test]
    fn test_remaining_ignores_bad_spans() {
        let r = Remaining::new("mañana").consume(0..2);
        assert_eq!(r.as_str(), "mañana");
        assert!(r.consumed().is_empty());
    }

    #[test]
    fn test_excise_and_collapse() {
        let text = "call parents tomorrow 1pm";
        let out = collapse_whitespace(&excise(text, &[13..21, 22..25]));
        assert_eq!(out, "call parents");
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Mark   Reports "), "mark reports");
    }
}

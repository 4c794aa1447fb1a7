//! Quick-add date/time resolution.
//!
//! Text runs through an ordered list of stages. Each stage sees only what
//! earlier stages left behind:
//!
//! 1. optional date engine (injected)
//! 2. relative phrase (`today`, `mañana`, `demain`, `next week`, ...)
//! 3. ISO-like date (`2025-09-14`)
//! 4. ambiguous numeric date (`14/09/2025`, day first)
//! 5. time of day (`4pm`, `16:00`, `20h`)
//!
//! The first stage that yields a date decides the date; later date stages
//! still consume their matches so stray digits never reach the time stage.

use std::fmt;
use std::ops::Range;

use chrono::NaiveDateTime;
use log::debug;

use super::date::DateStage;
use super::normalize::Remaining;
use super::time::find_time;
use crate::core::{DateEngine, QuickWhen};

/// Outcome of a resolution, with the spans of the original text it used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenResolution {
    pub when: QuickWhen,
    /// Byte spans consumed from the input, in stage order.
    pub consumed: Vec<Range<usize>>,
    /// Whether any stage produced a date (as opposed to the default).
    pub date_matched: bool,
}

/// Quick-add phrase parser with an optional date engine.
#[derive(Default)]
pub struct QuickWhenParser {
    engine: Option<Box<dyn DateEngine>>,
}

impl fmt::Debug for QuickWhenParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickWhenParser")
            .field("engine", &self.engine.is_some())
            .finish()
    }
}

impl QuickWhenParser {
    /// A parser that only uses the built-in stages.
    #[must_use]
    pub fn new() -> Self {
        Self { engine: None }
    }

    /// A parser that consults `engine` before the built-in stages.
    #[must_use]
    pub fn with_engine(engine: Box<dyn DateEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Whether an engine is installed.
    #[must_use]
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Resolve `text` to a date and optional time. Never fails.
    #[must_use]
    pub fn parse(&self, text: &str, now: NaiveDateTime) -> QuickWhen {
        self.resolve(text, now).when
    }

    /// Like [`parse`](Self::parse), also reporting which spans were used.
    #[must_use]
    pub fn resolve(&self, text: &str, now: NaiveDateTime) -> WhenResolution {
        let today = now.date();
        let mut remaining = Remaining::new(text);
        let mut date = None;

        if let Some(engine) = &self.engine {
            match engine.try_parse(remaining.as_str(), now) {
                Ok(Some(found)) if text.get(found.span.clone()).is_some() => {
                    remaining = remaining.consume(found.span);
                    if let Some(time) = found.time {
                        return WhenResolution {
                            when: QuickWhen::with_time(found.date, time),
                            consumed: remaining.consumed().to_vec(),
                            date_matched: true,
                        };
                    }
                    date = Some(found.date);
                },
                Ok(Some(found)) => {
                    debug!("date engine returned span {:?} outside the text, ignoring", found.span);
                },
                Ok(None) => {},
                Err(e) => debug!("date engine failed, using built-in stages: {e}"),
            }
        }

        for stage in DateStage::ORDER {
            if let Some(found) = stage.apply(remaining.as_str(), today) {
                debug!("{stage:?} stage matched {:?} -> {:?}", &text[found.span.clone()], found.value);
                remaining = remaining.consume(found.span);
                if date.is_none() {
                    date = found.value;
                }
            }
        }

        let mut time = None;
        if let Some(found) = find_time(remaining.as_str()) {
            debug!("time stage matched {:?} -> {:?}", &text[found.span.clone()], found.value);
            remaining = remaining.consume(found.span);
            time = found.value;
        }

        WhenResolution {
            when: QuickWhen {
                date: date.unwrap_or(today),
                time,
            },
            consumed: remaining.consumed().to_vec(),
            date_matched: date.is_some(),
        }
    }
}

/// Resolve `text` with the built-in stages only.
///
/// ```
/// use chrono::NaiveDate;
/// use memory_cue::features::nlp::parse_quick_when;
///
/// let now = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let when = parse_quick_when("14/09/2025 16:00", now);
/// assert_eq!(when.date_iso(), "2025-09-14");
/// assert_eq!(when.time_hm(), "16:00");
/// ```
#[must_use]
pub fn parse_quick_when(text: &str, now: NaiveDateTime) -> QuickWhen {
    QuickWhenParser::new().parse(text, now)
}

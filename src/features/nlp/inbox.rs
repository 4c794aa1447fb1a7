//! Inbox search queries with an optional time filter.
//!
//! `"Monday 4pm"` selects reminders due in the hour from next Monday 16:00;
//! `"tomorrow footy"` selects tomorrow's reminders mentioning footy; plain
//! text is a keyword search.

use std::ops::Range;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::normalize::{excise, find_relative_phrase, normalize_query};
use super::time::leading_time;
use crate::core::TimeRange;

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .unwrap_or_else(|e| panic!("Invalid weekday regex: {e}"))
});

/// Parsed inbox search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxQuery {
    /// Lowercased text left over after the temporal phrase is removed.
    pub keyword_query: String,
    pub time_range: Option<TimeRange>,
}

/// Inbox query parser with a configurable window for timed queries.
#[derive(Debug, Clone, Copy)]
pub struct InboxQueryParser {
    window: Duration,
}

impl Default for InboxQueryParser {
    fn default() -> Self {
        Self::new(Duration::minutes(60))
    }
}

struct Temporal {
    span: Range<usize>,
    date: NaiveDate,
    time: Option<NaiveTime>,
    /// Weekday matches move a week ahead when the time has passed today.
    weekly: bool,
}

impl InboxQueryParser {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Parse `text` relative to `now`, interpreting dates and times in
    /// `now`'s time zone.
    #[must_use]
    pub fn parse<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> InboxQuery {
        let local_now = now.naive_local();
        let tz = now.timezone();

        let Some(temporal) = find_weekday(text, local_now.date())
            .or_else(|| find_relative(text, local_now.date()))
        else {
            return InboxQuery {
                keyword_query: text.trim().to_lowercase(),
                time_range: None,
            };
        };

        let mut date = temporal.date;
        let range = match temporal.time {
            Some(time) => {
                if temporal.weekly && date.and_time(time) < local_now {
                    date += Duration::days(7);
                }
                TimeRange::local_window(&tz, date.and_time(time), self.window)
            },
            None => TimeRange::local_day(&tz, date),
        };
        debug!(
            "inbox query {:?} matched {date} {:?}",
            &text[temporal.span.clone()],
            temporal.time
        );

        InboxQuery {
            keyword_query: normalize_query(&excise(text, &[temporal.span])),
            time_range: Some(range),
        }
    }
}

/// Parse an inbox query with the default one-hour window.
#[must_use]
pub fn parse_inbox_time_query<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> InboxQuery {
    InboxQueryParser::default().parse(text, now)
}

fn find_weekday(text: &str, today: NaiveDate) -> Option<Temporal> {
    let found = WEEKDAY.find(text)?;
    let target: Weekday = found.as_str().parse().ok()?;
    let ahead = (7 + i64::from(target.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday()))
        % 7;
    let mut temporal = with_time(text, found.range(), today + Duration::days(ahead));
    temporal.weekly = true;
    Some(temporal)
}

fn find_relative(text: &str, today: NaiveDate) -> Option<Temporal> {
    let found = find_relative_phrase(text)?;
    Some(with_time(
        text,
        found.span,
        today + Duration::days(found.phrase.day_offset),
    ))
}

fn with_time(text: &str, span: Range<usize>, date: NaiveDate) -> Temporal {
    match leading_time(&text[span.end..]) {
        Some((len, time)) => Temporal {
            span: span.start..span.end + len,
            date,
            time: Some(time),
            weekly: false,
        },
        None => Temporal {
            span,
            date,
            time: None,
            weekly: false,
        },
    }
}

//! Pluggable date engines.
//!
//! The quick-add parser can delegate to a richer date engine before running
//! its own stages. Engines are injected through the parser's constructor;
//! a parser without one behaves exactly like the built-in stages.

use std::ops::Range;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use log::debug;
use thiserror::Error;

/// Failure inside a date engine. Never escapes the parser.
#[derive(Debug, Error)]
pub enum DateEngineError {
    /// The engine could not run at all.
    #[error("date engine unavailable: {0}")]
    Unavailable(String),
    /// The engine ran and failed.
    #[error("date engine failed: {0}")]
    Failed(String),
}

/// What an engine recognised and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineMatch {
    /// Resolved calendar date.
    pub date: NaiveDate,
    /// Resolved time of day, when the phrase carried one.
    pub time: Option<NaiveTime>,
    /// Byte span of the recognised phrase in the text given to the engine.
    pub span: Range<usize>,
}

/// A best-effort date engine.
///
/// `Ok(None)` means nothing was recognised. Errors are treated the same way
/// by the caller.
#[cfg_attr(test, mockall::automock)]
pub trait DateEngine: Send + Sync {
    /// Look for a date phrase in `text`, relative to `now`.
    ///
    /// # Errors
    ///
    /// Implementations may fail for any reason; callers fall through.
    fn try_parse(
        &self,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<Option<EngineMatch>, DateEngineError>;
}

/// English natural-language engine.
///
/// Understands phrases the built-in stages do not:
/// - `yesterday`, `today`, `tomorrow` combined with day parts
/// - `monday`, `next fri`, `this wednesday`
/// - `in 3 days`, `in 2 weeks`, `in 1 month`
/// - `dec 15`, `15 december`, `march 3rd`
/// - times `3pm`, `3:30pm`, `15:00` and `morning`, `noon`, `evening`, ...
///
/// A phrase must contain a date part; a bare time is left to the built-in
/// time stage. Numeric slash dates are also left alone so the day-first
/// reading of the built-in stage always applies to them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalEngine;

impl NaturalEngine {
    /// Longest phrase tried, in words ("next friday at 3pm").
    const MAX_WORDS: usize = 4;

    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DateEngine for NaturalEngine {
    fn try_parse(
        &self,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<Option<EngineMatch>, DateEngineError> {
        let words = word_spans(text);
        let today = now.date();

        for i in 0..words.len() {
            let longest = Self::MAX_WORDS.min(words.len() - i);
            for len in (1..=longest).rev() {
                let window = &words[i..i + len];
                let phrase = window
                    .iter()
                    .map(|w| clean_word(&text[w.clone()]))
                    .collect::<Vec<_>>()
                    .join(" ");
                if let Some((date, time)) = parse_datetime(&phrase, today) {
                    debug!("natural engine matched '{phrase}' -> {date} {time:?}");
                    return Ok(Some(EngineMatch {
                        date,
                        time,
                        span: window[0].start..window[len - 1].end,
                    }));
                }
            }
        }

        Ok(None)
    }
}

/// Byte spans of whitespace-separated words.
fn word_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push(s..idx);
                start = None;
            },
            (false, None) => start = Some(idx),
            _ => {},
        }
    }
    if let Some(s) = start {
        spans.push(s..text.len());
    }
    spans
}

fn clean_word(word: &str) -> String {
    word.trim_matches(|c: char| matches!(c, ',' | ';' | '!' | '?' | '(' | ')'))
        .to_lowercase()
}

/// Parse "<date> [at] [time]".
fn parse_datetime(input: &str, today: NaiveDate) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let (last, rest) = words.split_last()?;

    if let Some(time) = parse_time(last) {
        let rest = match rest.split_last() {
            Some((&("at" | "@"), before)) => before,
            _ => rest,
        };
        if rest.is_empty() {
            return None;
        }
        return parse_date(&rest.join(" "), today).map(|date| (date, Some(time)));
    }

    parse_date(input, today).map(|date| (date, None))
}

fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {},
    }

    parse_relative_offset(input, today)
        .or_else(|| parse_weekday(input, today))
        .or_else(|| parse_month_day(input, today))
}

/// "in X days/weeks/months".
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 || parts[0] != "in" {
        return None;
    }

    let amount: i64 = parts[1].parse().ok()?;
    let days = match parts[2].trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        "month" => amount.checked_mul(30)?,
        _ => return None,
    };

    today.checked_add_signed(Duration::try_days(days)?)
}

/// "monday", "next mon", "this monday".
///
/// Bare and `next` forms land strictly after today; `this` may be today.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (allow_today, day_str) = if let Some(rest) = input.strip_prefix("this ") {
        (true, rest)
    } else if let Some(rest) = input.strip_prefix("next ") {
        (false, rest)
    } else if input.ends_with("day") {
        // Abbreviations ("sat", "sun") only count after "this"/"next".
        (false, input)
    } else {
        return None;
    };

    let target = weekday_from_name(day_str)?;
    let mut days_until = (i64::from(target.num_days_from_sunday())
        - i64::from(today.weekday().num_days_from_sunday())
        + 7)
        % 7;
    if days_until == 0 && !allow_today {
        days_until = 7;
    }

    Some(today + Duration::days(days_until))
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// "dec 15", "15 dec", "december 15th". Past dates roll to next year.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let (month, day) = match (parse_month_name(parts[0]), parse_month_name(parts[1])) {
        (Some(month), None) => (month, parse_day_number(parts[1])?),
        (None, Some(month)) => (month, parse_day_number(parts[0])?),
        _ => return None,
    };

    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}

fn parse_day_number(input: &str) -> Option<u32> {
    let digits = input
        .strip_suffix("st")
        .or_else(|| input.strip_suffix("nd"))
        .or_else(|| input.strip_suffix("rd"))
        .or_else(|| input.strip_suffix("th"))
        .unwrap_or(input);
    digits.parse().ok()
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    match input {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        _ => {},
    }

    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return Some(time);
    }

    let (clock, is_pm) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (clock.parse::<u32>().ok()?, 0),
    };
    if hour == 0 || hour > 12 {
        return None;
    }

    let hour = match (is_pm, hour) {
        (true, h) if h < 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wednesday
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn parse(text: &str) -> Option<EngineMatch> {
        NaturalEngine::new().try_parse(text, now()).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_is_strictly_future() {
        assert_eq!(parse("wednesday").unwrap().date, ymd(2024, 5, 22));
        assert_eq!(parse("friday").unwrap().date, ymd(2024, 5, 17));
        assert_eq!(parse("next fri").unwrap().date, ymd(2024, 5, 17));
    }

    #[test]
    fn test_this_weekday_allows_today() {
        assert_eq!(parse("this wednesday").unwrap().date, ymd(2024, 5, 15));
    }

    #[test]
    fn test_relative_offsets() {
        assert_eq!(parse("in 3 days").unwrap().date, ymd(2024, 5, 18));
        assert_eq!(parse("in 2 weeks").unwrap().date, ymd(2024, 5, 29));
        assert_eq!(parse("in 1 month").unwrap().date, ymd(2024, 6, 14));
    }

    #[test]
    fn test_oversized_offsets_are_rejected() {
        assert!(parse("in 200000000000000 days").is_none());
        assert!(parse("in 2000000000000000000 weeks").is_none());
        assert!(parse("in 9223372036854775807 months").is_none());
        assert_eq!(parse_relative_offset("in 200000000 days", ymd(2024, 5, 15)), None);
    }

    #[test]
    fn test_month_day_forms() {
        assert_eq!(parse("dec 15").unwrap().date, ymd(2024, 12, 15));
        assert_eq!(parse("15 december").unwrap().date, ymd(2024, 12, 15));
        assert_eq!(parse("march 3rd").unwrap().date, ymd(2025, 3, 3));
    }

    #[test]
    fn test_date_with_time() {
        let m = parse("call mum friday at 3:30pm please").unwrap();
        assert_eq!(m.date, ymd(2024, 5, 17));
        assert_eq!(m.time, NaiveTime::from_hms_opt(15, 30, 0));
        assert_eq!(&"call mum friday at 3:30pm please"[m.span], "friday at 3:30pm");
    }

    #[test]
    fn test_day_part_words() {
        let m = parse("tomorrow morning").unwrap();
        assert_eq!(m.date, ymd(2024, 5, 16));
        assert_eq!(m.time, NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn test_bare_abbreviation_is_plain_text() {
        assert!(parse("sun cream").is_none());
        assert!(parse("sat exam").is_none());
    }

    #[test]
    fn test_yesterday() {
        assert_eq!(parse("yesterday").unwrap().date, ymd(2024, 5, 14));
    }

    #[test]
    fn test_bare_time_is_not_claimed() {
        assert!(parse("4pm").is_none());
        assert!(parse("16:00").is_none());
    }

    #[test]
    fn test_numeric_dates_are_not_claimed() {
        assert!(parse("03/04/2025").is_none());
        assert!(parse("14/09 4pm").is_none());
    }

    #[test]
    fn test_plain_text() {
        assert!(parse("mark reports").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_word_spans_handle_unicode() {
        let text = "mañana  at 5pm";
        let spans = word_spans(text);
        assert_eq!(spans.len(), 3);
        assert_eq!(&text[spans[0].clone()], "mañana");
        assert_eq!(&text[spans[2].clone()], "5pm");
    }

    #[test]
    fn test_parse_time_12hour() {
        assert_eq!(parse_time("3pm"), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_time("12am"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time("12pm"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_time("13pm"), None);
    }
}

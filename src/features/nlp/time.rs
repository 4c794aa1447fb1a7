//! Time-of-day extraction.
//!
//! Accepts `4pm`, `4 pm`, `4:30pm`, `16:00`, `20h` and `20h30`. A `pm` adds
//! twelve hours below noon, `12am` is midnight, and the `h` form is already
//! on the 24-hour clock.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::date::StageMatch;

static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?:(:)(\d{2})|(h)(\d{2})?)?\s*(?:(am|pm)\b)?")
        .unwrap_or_else(|e| panic!("Invalid time regex: {e}"))
});

static LEADING_TIME: Lazy<Regex> = Lazy::new(|| {
    // Used right after a weekday or relative phrase: "monday at 4pm".
    Regex::new(r"(?i)^\s*(?:(?:at|@)\s*)?(\d{1,2})(?:([:h])(\d{2})?)?\s*(?:(am|pm)\b)?")
        .unwrap_or_else(|e| panic!("Invalid leading time regex: {e}"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Convert clock parts to a time, or `None` when they are not a valid time.
fn clock(hour: u32, minute: u32, meridiem: Option<Meridiem>) -> Option<NaiveTime> {
    let hour = match (meridiem, hour) {
        (Some(Meridiem::Pm), h) if h < 12 => h + 12,
        (Some(Meridiem::Am), 12) => 0,
        (_, h) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn meridiem(caps: &Captures<'_>, group: usize) -> Option<Meridiem> {
    caps.get(group).map(|m| {
        if m.as_str().eq_ignore_ascii_case("pm") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    })
}

fn digits(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

fn is_digit_at(text: &str, idx: usize) -> bool {
    text.as_bytes().get(idx).is_some_and(u8::is_ascii_digit)
}

/// Find the first valid time of day in `text`.
///
/// Candidates glued to other digits (the `10` in `101`) are skipped, as are
/// candidates that are not a real clock time (`25:00`).
#[must_use]
pub fn find_time(text: &str) -> Option<StageMatch<NaiveTime>> {
    TIME.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let hour_group = caps.get(1)?;
        if (whole.start() > 0 && is_digit_at(text, whole.start() - 1))
            || is_digit_at(text, hour_group.end())
        {
            return None;
        }

        let hour = digits(&caps, 1)?;
        let minute = digits(&caps, 3).or_else(|| digits(&caps, 5)).unwrap_or(0);
        let time = clock(hour, minute, meridiem(&caps, 6))?;
        Some(StageMatch {
            span: trim_end_span(text, whole.range()),
            value: Some(time),
        })
    })
}

/// Parse a time at the very start of `text`, returning the byte length
/// consumed and the time.
///
/// Stricter than [`find_time`]: a bare number is not a time here. It needs
/// minutes, an `h` marker or a meridiem.
#[must_use]
pub fn leading_time(text: &str) -> Option<(usize, NaiveTime)> {
    let caps = LEADING_TIME.captures(text)?;
    let hour_group = caps.get(1)?;
    if is_digit_at(text, hour_group.end()) {
        return None;
    }

    let separator = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
    let minutes = digits(&caps, 3);
    let meridiem = meridiem(&caps, 4);
    let explicit = minutes.is_some() || meridiem.is_some() || separator.as_deref() == Some("h");
    if !explicit || (separator.as_deref() == Some(":") && minutes.is_none()) {
        return None;
    }

    let time = clock(digits(&caps, 1)?, minutes.unwrap_or(0), meridiem)?;
    let whole = caps.get(0)?;
    Some((trim_end_span(text, whole.range()).end, time))
}

fn trim_end_span(text: &str, span: std::ops::Range<usize>) -> std::ops::Range<usize> {
    let trimmed = text[span.clone()].trim_end().len();
    span.start..span.start + trimmed
}

//! Date and time value types shared by the parsers and the reminder store.
//!
//! Parsers work on local wall-clock values (`NaiveDate`, `NaiveTime`). The
//! helpers here turn those into instants in a concrete time zone so inbox
//! ranges and reminder due dates can be compared as epoch milliseconds.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Serialize, Serializer};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Result of resolving a quick-add phrase.
///
/// `time` is `None` when the text named no time of day. Callers must treat
/// that as "no time given", not as midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickWhen {
    /// Resolved calendar date (defaults to the reference date).
    pub date: NaiveDate,
    /// Resolved time of day, if any.
    pub time: Option<NaiveTime>,
}

impl QuickWhen {
    /// Create a result with just a date.
    #[must_use]
    pub const fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Create a result with date and time.
    #[must_use]
    pub const fn with_time(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// The date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The time as `HH:MM`, or an empty string when no time was found.
    #[must_use]
    pub fn time_hm(&self) -> String {
        self.time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }

    /// Combine date and time. `None` when no time was parsed.
    #[must_use]
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        self.time.map(|t| self.date.and_time(t))
    }
}

impl Serialize for QuickWhen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr {
            date: String,
            time: String,
        }

        Repr {
            date: self.date_iso(),
            time: self.time_hm(),
        }
        .serialize(serializer)
    }
}

/// Half-open interval of epoch milliseconds, `[start, end)`.
///
/// `end > start` for every value; the constructor refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: i64,
    end: i64,
}

impl TimeRange {
    /// Create a range, or `None` when `end <= start`.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Option<Self> {
        if end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Inclusive start in epoch milliseconds.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive end in epoch milliseconds.
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Whether an instant falls inside the range.
    #[must_use]
    pub const fn contains(&self, millis: i64) -> bool {
        millis >= self.start && millis < self.end
    }

    /// The whole local calendar day `date` in `tz`.
    #[must_use]
    pub fn local_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Self {
        let midnight = NaiveTime::default();
        let start = resolve_local(tz, date.and_time(midnight)).timestamp_millis();
        let end = resolve_local(tz, (date + Duration::days(1)).and_time(midnight)).timestamp_millis();
        Self::new(start, end).unwrap_or(Self {
            start,
            end: start + DAY_MILLIS,
        })
    }

    /// A window of `window` length starting at the local wall-clock time `at`.
    #[must_use]
    pub fn local_window<Tz: TimeZone>(tz: &Tz, at: NaiveDateTime, window: Duration) -> Self {
        let start = resolve_local(tz, at).timestamp_millis();
        let length = window.num_milliseconds();
        Self {
            start,
            end: start + if length > 0 { length } else { DAY_MILLIS },
        }
    }
}

/// Interpret a wall-clock value in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap move forward to the first valid local time after the gap.
#[must_use]
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..96 {
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt;
        }
        candidate += Duration::minutes(15);
    }
    tz.from_utc_datetime(&naive)
}

/// Interpret a wall-clock value in `tz` and convert it to UTC.
#[must_use]
pub fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    resolve_local(tz, naive).with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quick_when_strings() {
        let when = QuickWhen::with_time(date(2025, 9, 4), NaiveTime::from_hms_opt(8, 5, 0).unwrap());
        assert_eq!(when.date_iso(), "2025-09-04");
        assert_eq!(when.time_hm(), "08:05");

        let bare = QuickWhen::date_only(date(2025, 1, 1));
        assert_eq!(bare.time_hm(), "");
        assert!(bare.to_datetime().is_none());
    }

    #[test]
    fn test_quick_when_serializes_as_strings() {
        let when = QuickWhen::date_only(date(2024, 12, 31));
        let json = serde_json::to_string(&when).unwrap();
        assert_eq!(json, r#"{"date":"2024-12-31","time":""}"#);
    }

    #[test]
    fn test_time_range_rejects_empty() {
        assert!(TimeRange::new(10, 10).is_none());
        assert!(TimeRange::new(10, 5).is_none());
        let range = TimeRange::new(5, 10).unwrap();
        assert!(range.contains(5));
        assert!(!range.contains(10));
    }

    #[test]
    fn test_local_day_utc() {
        let range = TimeRange::local_day(&Utc, date(2024, 5, 15));
        assert_eq!(range.end() - range.start(), DAY_MILLIS);
        assert_eq!(
            range.start(),
            Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_local_day_offset() {
        let tz = FixedOffset::east_opt(10 * 3600).unwrap();
        let range = TimeRange::local_day(&tz, date(2024, 5, 15));
        assert_eq!(
            range.start(),
            Utc.with_ymd_and_hms(2024, 5, 14, 14, 0, 0).unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_local_window() {
        let at = date(2024, 5, 20).and_hms_opt(16, 0, 0).unwrap();
        let range = TimeRange::local_window(&Utc, at, Duration::minutes(60));
        assert_eq!(range.end() - range.start(), 60 * 60 * 1000);
    }

    #[test]
    fn test_local_window_nonpositive_length() {
        let at = date(2024, 5, 20).and_hms_opt(16, 0, 0).unwrap();
        let range = TimeRange::local_window(&Utc, at, Duration::zero());
        assert!(range.end() > range.start());
    }

    #[test]
    fn test_local_to_utc() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let naive = date(2024, 1, 2).and_hms_opt(9, 30, 0).unwrap();
        let utc = local_to_utc(&tz, naive);
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap());
    }
}

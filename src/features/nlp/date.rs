//! Date stages of the quick-add pipeline.

use std::ops::Range;

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::normalize::find_relative_phrase;

/// A pattern hit inside the working text.
///
/// `value` is `None` when the text had the right shape but did not name a
/// real value (`31/02`). The span is still consumed in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMatch<T> {
    pub span: Range<usize>,
    pub value: Option<T>,
}

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    // 2025-09-14, 2025.9.14
    Regex::new(r"(\d{4})[-.](\d{1,2})[-.](\d{1,2})")
        .unwrap_or_else(|e| panic!("Invalid ISO date regex: {e}"))
});

static AMBIGUOUS_DATE: Lazy<Regex> = Lazy::new(|| {
    // 14/09, 09/14/2025, 3.4.25
    Regex::new(r"(\d{1,2})[/.](\d{1,2})(?:[/.](\d{2,4}))?")
        .unwrap_or_else(|e| panic!("Invalid numeric date regex: {e}"))
});

/// Date stages, run in `ORDER` after the optional engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStage {
    /// today / tomorrow / next week and their translations.
    Relative,
    /// `YYYY-MM-DD` or `YYYY.MM.DD`.
    Iso,
    /// `D/M`, `D/M/Y`, dot-separated variants; day-first unless impossible.
    Ambiguous,
}

impl DateStage {
    pub const ORDER: [Self; 3] = [Self::Relative, Self::Iso, Self::Ambiguous];

    /// Run this stage against `text`.
    #[must_use]
    pub fn apply(self, text: &str, today: NaiveDate) -> Option<StageMatch<NaiveDate>> {
        match self {
            Self::Relative => relative_date(text, today),
            Self::Iso => iso_date(text),
            Self::Ambiguous => ambiguous_date(text, today),
        }
    }
}

fn relative_date(text: &str, today: NaiveDate) -> Option<StageMatch<NaiveDate>> {
    let found = find_relative_phrase(text)?;
    Some(StageMatch {
        span: found.span,
        value: today.checked_add_signed(Duration::days(found.phrase.day_offset)),
    })
}

fn iso_date(text: &str) -> Option<StageMatch<NaiveDate>> {
    let caps = ISO_DATE.captures(text)?;
    let value = match (number(&caps, 1), number(&caps, 2), number(&caps, 3)) {
        (Some(year), Some(month), Some(day)) => {
            i32::try_from(year).ok().and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        },
        _ => None,
    };
    Some(StageMatch {
        span: caps.get(0)?.range(),
        value,
    })
}

fn ambiguous_date(text: &str, today: NaiveDate) -> Option<StageMatch<NaiveDate>> {
    let caps = AMBIGUOUS_DATE.captures(text)?;
    let span = caps.get(0)?.range();

    let (Some(first), Some(second)) = (number(&caps, 1), number(&caps, 2)) else {
        return Some(StageMatch { span, value: None });
    };
    let year = match number(&caps, 3) {
        Some(y) if y < 100 => i32::try_from(y + 2000).ok(),
        Some(y) => i32::try_from(y).ok(),
        None => Some(today.year()),
    };

    let (day, month) = day_month_order(first, second);
    Some(StageMatch {
        span,
        value: year.and_then(|y| NaiveDate::from_ymd_opt(y, month, day)),
    })
}

/// Decide which of two numbers is the day. Returns `(day, month)`.
///
/// A number above 12 can only be a day. When both could be either, the day
/// comes first.
#[must_use]
pub const fn day_month_order(first: u32, second: u32) -> (u32, u32) {
    if first > 12 && second <= 12 {
        (first, second)
    } else if second > 12 && first <= 12 {
        (second, first)
    } else {
        (first, second)
    }
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_month_order() {
        assert_eq!(day_month_order(14, 9), (14, 9));
        assert_eq!(day_month_order(9, 14), (14, 9));
        assert_eq!(day_month_order(3, 4), (3, 4));
        assert_eq!(day_month_order(13, 14), (13, 14));
    }

    #[test]
    fn test_relative_stage() {
        let m = DateStage::Relative.apply("pay rent tomorrow", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2024, 5, 16)));
        assert_eq!(m.span, 9..17);
    }

    #[test]
    fn test_iso_stage() {
        let m = DateStage::Iso.apply("due 2025-09-14 now", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2025, 9, 14)));
        assert_eq!(m.span, 4..14);

        let m = DateStage::Iso.apply("2025.1.2", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2025, 1, 2)));
    }

    #[test]
    fn test_iso_stage_invalid_date_still_matches() {
        let m = DateStage::Iso.apply("2025-02-30", today()).unwrap();
        assert_eq!(m.value, None);
        assert_eq!(m.span, 0..10);
    }

    #[test]
    fn test_ambiguous_day_first() {
        let m = DateStage::Ambiguous.apply("14/09/2025", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2025, 9, 14)));

        let m = DateStage::Ambiguous.apply("03/04/2025", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2025, 4, 3)));
    }

    #[test]
    fn test_ambiguous_month_first_when_forced() {
        let m = DateStage::Ambiguous.apply("09/14/2025 4pm", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2025, 9, 14)));
        assert_eq!(m.span, 0..10);
    }

    #[test]
    fn test_ambiguous_two_digit_year_and_default_year() {
        let m = DateStage::Ambiguous.apply("1.2.25", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2025, 2, 1)));

        let m = DateStage::Ambiguous.apply("25/12", today()).unwrap();
        assert_eq!(m.value, Some(ymd(2024, 12, 25)));
    }

    #[test]
    fn test_ambiguous_impossible_date() {
        let m = DateStage::Ambiguous.apply("31/02", today()).unwrap();
        assert_eq!(m.value, None);
        assert_eq!(m.span, 0..5);
    }

    #[test]
    fn test_no_match() {
        for stage in DateStage::ORDER {
            assert!(stage.apply("buy milk", today()).is_none());
        }
    }
}

//! Calendar-date arithmetic for ages and shared-time spans.
//!
//! Everything here works on `chrono::NaiveDate`, i.e. on year/month/day
//! components with no time of day and no timezone. Day differences are
//! therefore immune to daylight-saving shifts, and a `"YYYY-MM-DD"` string
//! always denotes the same calendar day on every host.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// A date string that is not a valid `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("expected a date in YYYY-MM-DD form, got {0:?}")]
    Format(String),
    #[error("{0:?} is not a calendar date")]
    OutOfRange(String),
}

/// Parse `YYYY-MM-DD` from its integer components.
///
/// The string is split into year, month and day and handed to
/// `NaiveDate::from_ymd_opt`, so no offset is ever applied: `"2024-03-01"`
/// yields `(2024, 3, 1)` regardless of the configured timezone.
///
/// ```
/// # use shared_time::dates::parse_ymd;
/// use chrono::Datelike;
/// let d = parse_ymd("2024-03-01")?;
/// assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 1));
/// # Ok::<(), shared_time::dates::DateError>(())
/// ```
pub fn parse_ymd(s: &str) -> Result<NaiveDate, DateError> {
    let s = s.trim();
    let mut parts = s.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DateError::Format(s.to_string()));
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(DateError::Format(s.to_string()));
    }
    let year = y.parse::<i32>().map_err(|_| DateError::Format(s.to_string()))?;
    let month = m.parse::<u32>().map_err(|_| DateError::Format(s.to_string()))?;
    let day = d.parse::<u32>().map_err(|_| DateError::Format(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange(s.to_string()))
}

/// Calendar days from `a` to `b`; negative when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Completed years from `a` to `b`, birthday-aware.
///
/// The plain year difference is reduced by one when `b`'s month/day falls
/// before `a`'s. When `b` precedes `a` the result is the negated count of
/// completed years from `b` to `a`.
pub fn years_between(a: NaiveDate, b: NaiveDate) -> i32 {
    if b < a {
        return -years_between(b, a);
    }
    let mut years = b.year() - a.year();
    if (b.month(), b.day()) < (a.month(), a.day()) {
        years -= 1;
    }
    years
}

/// `date` shifted by whole years.
///
/// Feb 29 lands on Feb 28 in non-leap target years. Saturates at chrono's
/// date range instead of failing.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs().saturating_mul(12));
    let shifted = if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(if years >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_ymd("2024/03/01"), Err(DateError::Format(_))));
        assert!(matches!(parse_ymd("24-3-1"), Err(DateError::Format(_))));
        assert!(matches!(parse_ymd(""), Err(DateError::Format(_))));
        assert!(matches!(parse_ymd("2023-02-29"), Err(DateError::OutOfRange(_))));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_ymd(" 2000-06-15 ").unwrap(), ymd(2000, 6, 15));
    }

    #[test]
    fn leap_day_anniversary_clamps_to_feb_28() {
        assert_eq!(add_years(ymd(2020, 2, 29), 1), ymd(2021, 2, 28));
        assert_eq!(add_years(ymd(2020, 2, 29), 4), ymd(2024, 2, 29));
        assert_eq!(add_years(ymd(2020, 2, 29), -1), ymd(2019, 2, 28));
    }

    #[test]
    fn years_between_is_antisymmetric() {
        let a = ymd(2000, 6, 15);
        let b = ymd(2024, 6, 14);
        assert_eq!(years_between(a, b), 23);
        assert_eq!(years_between(b, a), -23);
    }
}

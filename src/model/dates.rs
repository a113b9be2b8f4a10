//! Calendar-day helpers.
//!
//! Every date that crosses a boundary (project files, the task-update sink)
//! is a `YYYY-MM-DD` string naming a UTC calendar day. Inside the crate dates
//! are `NaiveDate`, which has no time-of-day and no offset, so arithmetic
//! never drifts across local timezones.

use chrono::{Duration, NaiveDate, Utc};

use crate::error::DateError;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` day string.
pub fn parse_day(s: &str) -> Result<NaiveDate, DateError> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields; the boundary format does not.
    if trimmed.len() != 10 {
        return Err(DateError {
            input: s.to_string(),
        });
    }
    NaiveDate::parse_from_str(trimmed, DAY_FORMAT).map_err(|_| DateError {
        input: s.to_string(),
    })
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Inclusive length in days; a task starting and ending on the same day lasts 1.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    days_between(start, end) + 1
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Today's UTC calendar date. Read from the clock on every call.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn parses_and_formats_boundary_strings() {
        let date = d("2024-01-05");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(format_day(date), "2024-01-05");
    }

    #[test]
    fn rejects_non_boundary_formats() {
        assert!(parse_day("05/01/2024").is_err());
        assert!(parse_day("2024-1-5").is_err());
        assert!(parse_day("2024-02-30").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn durations_are_inclusive() {
        assert_eq!(duration_days(d("2024-01-05"), d("2024-01-10")), 6);
        assert_eq!(duration_days(d("2024-01-05"), d("2024-01-05")), 1);
        assert_eq!(days_between(d("2024-01-10"), d("2024-01-05")), -5);
    }

    #[test]
    fn add_days_crosses_month_and_leap_day() {
        assert_eq!(add_days(d("2024-02-27"), 3), d("2024-03-01"));
        assert_eq!(add_days(d("2024-03-01"), -1), d("2024-02-29"));
    }
}

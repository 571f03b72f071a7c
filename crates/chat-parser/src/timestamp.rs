//! Shared timestamp plumbing for the per-format parsers.
//!
//! Exports carry naive local timestamps with no zone information; the engine
//! interprets them as UTC and records that assumption as a diagnostic on the
//! parse result.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Two-digit years pivot at 69: `00..=69` → 2000s, `70..=99` → 1900s.
pub(crate) fn full_year(year: u32) -> i32 {
    if year < 100 {
        if year <= 69 {
            2000 + year as i32
        } else {
            1900 + year as i32
        }
    } else {
        year as i32
    }
}

/// Resolve an ambiguous `a/b/year` date, trying month-first then day-first.
/// The first layout that names a real calendar date wins.
pub(crate) fn resolve_date(a: u32, b: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, a, b).or_else(|| NaiveDate::from_ymd_opt(year, b, a))
}

/// Resolve an unambiguous day-first `d/m/year` date, falling back to
/// month-first for exports that ignore the platform convention.
pub(crate) fn resolve_date_day_first(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

/// Convert a 12-hour clock reading to 24-hour when an AM/PM token is present.
pub(crate) fn to_24h(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some("PM") if hour < 12 => hour + 12,
        Some("AM") if hour == 12 => 0,
        _ => hour,
    }
}

/// Assemble a UTC instant from naive parts. Missing seconds default to 0.
pub(crate) fn assemble(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<Utc>> {
    date.and_hms_opt(hour, minute, second)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(full_year(23), 2023);
        assert_eq!(full_year(69), 2069);
        assert_eq!(full_year(70), 1970);
        assert_eq!(full_year(99), 1999);
        assert_eq!(full_year(2023), 2023);
    }

    #[test]
    fn test_month_first_wins_when_valid() {
        let date = resolve_date(3, 4, 2023).unwrap();
        assert_eq!((date.month(), date.day()), (3, 4));
    }

    #[test]
    fn test_day_first_fallback() {
        // 31 cannot be a month, so the day-first reading applies.
        let date = resolve_date(31, 12, 2023).unwrap();
        assert_eq!((date.month(), date.day()), (12, 31));
    }

    #[test]
    fn test_meridiem_conversion() {
        assert_eq!(to_24h(10, Some("PM")), 22);
        assert_eq!(to_24h(12, Some("PM")), 12);
        assert_eq!(to_24h(12, Some("AM")), 0);
        assert_eq!(to_24h(7, Some("AM")), 7);
        assert_eq!(to_24h(17, None), 17);
    }

    #[test]
    fn test_assemble_is_utc() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let instant = assemble(date, 22, 30, 0).unwrap();
        assert_eq!(instant.hour(), 22);
        assert_eq!(instant.timezone(), Utc);
    }
}

//! Month arithmetic shared by the calendar client and the API proxy.
//!
//! Months are zero-based (`0` = January) everywhere a month travels on its
//! own, which matches the `month` parameter the proxy accepts.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A displayed month: year plus zero-based month index.
///
/// This is the calendar's DisplayState value and the key space of the month
/// cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    /// Creates a year-month, returning `None` for a month index outside `0..=11`
    /// or a year chrono cannot represent.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        if month0 > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
        Some(Self { year, month0 })
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// One-based month number
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    /// Moves by `delta` months, rolling the year over in both directions.
    pub fn shift(&self, delta: i32) -> Self {
        let total = self.year as i64 * 12 + self.month0 as i64 + delta as i64;
        Self {
            year: total.div_euclid(12) as i32,
            month0: total.rem_euclid(12) as u32,
        }
    }

    /// Cache key in `YYYY-MM` form
    pub fn cache_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month())
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month
    pub fn last_day(&self) -> u32 {
        last_day_of_month(self.year, self.month0)
    }

    /// Inclusive date range covering the whole month
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let first = self.first_day();
        let last = first.with_day(self.last_day()).unwrap_or(first);
        (first, last)
    }

    /// Weekday index of the first day, Sunday = 0
    pub fn first_weekday(&self) -> u32 {
        first_weekday(self.year, self.month0)
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// Display title, e.g. `February 2024`
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

/// Number of days in a month, computed as "day 0 of the following month".
///
/// # Example
/// ```
/// use release_calendar::calendar::dates::last_day_of_month;
///
/// assert_eq!(last_day_of_month(2024, 1), 29);
/// assert_eq!(last_day_of_month(1900, 1), 28);
/// ```
pub fn last_day_of_month(year: i32, month0: u32) -> u32 {
    let (next_year, next_month) = if month0 >= 11 {
        (year + 1, 1)
    } else {
        (year, month0 + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Weekday index of the first day of a month, Sunday = 0
pub fn first_weekday(year: i32, month0: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Parses an upstream `YYYY-MM-DD` release date
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Formats a date the way the upstream `dates` filter expects
pub fn format_api_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_day_of_month_leap_years() {
        assert_eq!(last_day_of_month(2024, 1), 29);
        assert_eq!(last_day_of_month(2023, 1), 28);
        assert_eq!(last_day_of_month(2000, 1), 29);
        assert_eq!(last_day_of_month(1900, 1), 28);
    }

    #[test]
    fn test_last_day_of_month_every_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month0, days) in expected.iter().enumerate() {
            assert_eq!(
                last_day_of_month(2023, month0 as u32),
                *days,
                "month index {month0}"
            );
        }
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        assert_eq!(last_day_of_month(2024, 11), 31);
    }

    #[test]
    fn test_first_weekday_sunday_based() {
        // 2024-09-01 was a Sunday, 2024-02-01 a Thursday
        assert_eq!(first_weekday(2024, 8), 0);
        assert_eq!(first_weekday(2024, 1), 4);
        // 2023-07-01 was a Saturday
        assert_eq!(first_weekday(2023, 6), 6);
    }

    #[test]
    fn test_year_month_rejects_out_of_range_month() {
        assert!(YearMonth::new(2024, 12).is_none());
        assert!(YearMonth::new(2024, 11).is_some());
    }

    #[test]
    fn test_shift_rolls_years() {
        let january = YearMonth::new(2024, 0).unwrap();
        assert_eq!(january.shift(-1), YearMonth::new(2023, 11).unwrap());
        assert_eq!(january.shift(12), YearMonth::new(2025, 0).unwrap());
        assert_eq!(january.shift(-25), YearMonth::new(2021, 11).unwrap());

        let december = YearMonth::new(2024, 11).unwrap();
        assert_eq!(december.shift(1), YearMonth::new(2025, 0).unwrap());
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(YearMonth::new(2024, 1).unwrap().cache_key(), "2024-02");
        assert_eq!(YearMonth::new(987, 10).unwrap().cache_key(), "0987-11");
    }

    #[test]
    fn test_date_range_covers_month() {
        let (start, end) = YearMonth::new(2024, 1).unwrap().date_range();
        assert_eq!(format_api_date(start), "2024-02-01");
        assert_eq!(format_api_date(end), "2024-02-29");
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("2017-03-03"),
            NaiveDate::from_ymd_opt(2017, 3, 3)
        );
        assert!(parse_release_date("TBA").is_none());
        assert!(parse_release_date("2017-02-30").is_none());
    }

    #[test]
    fn test_title() {
        assert_eq!(YearMonth::new(2024, 1).unwrap().title(), "February 2024");
    }
}

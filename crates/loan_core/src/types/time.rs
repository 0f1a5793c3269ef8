//! Calendar date type for repayment schedules.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Calendar-aware day and month arithmetic for due-date generation
//!
//! Month arithmetic always keeps the day-of-month and clamps it to the last
//! valid day of the target month (Jan 31 + 1 month = Feb 28/29). Schedules
//! compute every due date from the start date, so clamping never accumulates.
//!
//! # Examples
//!
//! ```
//! use loan_core::types::time::Date;
//!
//! let start = Date::from_ymd(2024, 1, 15).unwrap();
//! assert_eq!(start.add_months(6).unwrap(), Date::from_ymd(2024, 7, 15).unwrap());
//! assert_eq!(start.add_days(15).unwrap(), Date::from_ymd(2024, 1, 30).unwrap());
//! ```

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and calendar arithmetic.
///
/// # Examples
///
/// ```
/// use loan_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    ///
    /// Only callers at the edge of the system should use this; schedule
    /// computation always takes its start date as an argument.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date `days` calendar days later.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_core::types::time::Date;
    ///
    /// let start = Date::from_ymd(2024, 2, 20).unwrap();
    /// // Crosses the leap day
    /// assert_eq!(start.add_days(10).unwrap(), Date::from_ymd(2024, 3, 1).unwrap());
    /// ```
    pub fn add_days(self, days: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("adding {} days to {}", days, self),
            })
    }

    /// Returns the date `months` calendar months later.
    ///
    /// The day-of-month is preserved where possible and otherwise clamped
    /// to the last day of the target month.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_core::types::time::Date;
    ///
    /// let start = Date::from_ymd(2023, 8, 31).unwrap();
    /// assert_eq!(start.add_months(1).unwrap(), Date::from_ymd(2023, 9, 30).unwrap());
    /// assert_eq!(start.add_months(6).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// assert_eq!(start.add_months(12).unwrap(), Date::from_ymd(2024, 8, 31).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("adding {} months to {}", months, self),
            })
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_from_ymd_invalid() {
        assert_eq!(
            Date::from_ymd(2024, 2, 30),
            Err(DateError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30
            })
        );
        assert!(Date::from_ymd(2024, 13, 1).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date = Date::parse("2024-03-05").unwrap();
        assert_eq!(date, d(2024, 3, 5));
        assert_eq!(format!("{}", date), "2024-03-05");
        assert_eq!(" 2024-03-05 ".parse::<Date>().unwrap(), date);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Date::parse("2024/03/05"),
            Err(DateError::ParseError(_))
        ));
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn test_add_days() {
        assert_eq!(d(2024, 1, 1).add_days(0).unwrap(), d(2024, 1, 1));
        assert_eq!(d(2024, 1, 1).add_days(31).unwrap(), d(2024, 2, 1));
        assert_eq!(d(2023, 12, 20).add_days(15).unwrap(), d(2024, 1, 4));
        assert_eq!(d(2023, 2, 20).add_days(10).unwrap(), d(2023, 3, 2));
    }

    #[test]
    fn test_add_months_simple() {
        assert_eq!(d(2024, 1, 15).add_months(1).unwrap(), d(2024, 2, 15));
        assert_eq!(d(2024, 1, 15).add_months(12).unwrap(), d(2025, 1, 15));
        assert_eq!(d(2024, 11, 15).add_months(3).unwrap(), d(2025, 2, 15));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(d(2024, 1, 31).add_months(1).unwrap(), d(2024, 2, 29));
        assert_eq!(d(2023, 1, 31).add_months(1).unwrap(), d(2023, 2, 28));
        assert_eq!(d(2024, 3, 31).add_months(1).unwrap(), d(2024, 4, 30));
        // Clamping does not carry into later months when counted from the start
        assert_eq!(d(2024, 1, 31).add_months(2).unwrap(), d(2024, 3, 31));
    }

    #[test]
    fn test_add_months_leap_day() {
        assert_eq!(d(2024, 2, 29).add_months(12).unwrap(), d(2025, 2, 28));
        assert_eq!(d(2024, 2, 29).add_months(48).unwrap(), d(2028, 2, 29));
    }

    #[test]
    fn test_add_overflow() {
        let max = Date::from(NaiveDate::MAX);
        assert!(matches!(max.add_days(1), Err(DateError::Overflow { .. })));
        assert!(matches!(max.add_months(1), Err(DateError::Overflow { .. })));
    }

    #[test]
    fn test_sub() {
        assert_eq!(d(2024, 3, 1) - d(2024, 2, 1), 29);
        assert_eq!(d(2023, 3, 1) - d(2023, 2, 1), 28);
        assert_eq!(d(2024, 1, 1) - d(2024, 1, 11), -10);
    }

    #[test]
    fn test_ordering() {
        assert!(d(2024, 1, 1) < d(2024, 1, 2));
        assert!(d(2025, 1, 1) > d(2024, 12, 31));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_iso_string() {
        let date = d(2024, 6, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (1990i32..2100i32, 1u32..13u32, 1u32..32u32).prop_filter_map(
                "valid date",
                |(year, month, day)| Date::from_ymd(year, month, day).ok(),
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_add_months_is_monotonic(start in date_strategy(), n in 0u32..480) {
                let a = start.add_months(n).unwrap();
                let b = start.add_months(n + 1).unwrap();
                prop_assert!(a < b);
                prop_assert!(b - a >= 28 && b - a <= 31);
            }

            #[test]
            fn test_add_months_keeps_day_or_clamps(start in date_strategy(), n in 1u32..480) {
                let shifted = start.add_months(n).unwrap();
                prop_assert!(shifted.day() <= start.day());
                let total = start.month() - 1 + n;
                prop_assert_eq!(shifted.month(), total % 12 + 1);
            }

            #[test]
            fn test_add_days_matches_sub(start in date_strategy(), n in 0u32..4000) {
                let shifted = start.add_days(n).unwrap();
                prop_assert_eq!(shifted - start, i64::from(n));
            }
        }
    }
}

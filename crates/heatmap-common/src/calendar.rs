//! Calendar primitives: month-day keys, leap years and the supported year range.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::{HeatmapError, HeatmapResult};

/// Years the normalizer and renderer accept as a reference year.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1800..=2100;

/// Synthetic year that climate-normal dates are anchored to.
///
/// A leap year, so `02-29` survives until the series is projected onto a
/// real reference year.
pub const NORMALS_ANCHOR_YEAR: i32 = 2000;

/// A calendar day without a year, e.g. `07-04`.
///
/// Any day that exists in a leap year is a valid key, including `02-29`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Build a key, returning `None` for days that do not exist in any year.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(NORMALS_ANCHOR_YEAR, month, day).map(|_| Self { month, day })
    }

    /// The key of a concrete date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// The concrete date of this key in `year`, or `None` for `02-29` in a
    /// non-leap year.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Error parsing a `MM-DD` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month-day key '{0}', expected MM-DD")]
pub struct ParseMonthDayError(pub String);

impl FromStr for MonthDay {
    type Err = ParseMonthDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMonthDayError(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        MonthDay::new(month, day).ok_or_else(invalid)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Check that `year` can be used as a reference year.
pub fn validate_reference_year(year: i32) -> HeatmapResult<i32> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(year)
    } else {
        Err(HeatmapError::InvalidReferenceYear {
            year,
            min: *SUPPORTED_YEARS.start(),
            max: *SUPPORTED_YEARS.end(),
        })
    }
}

/// Every date of `year` in calendar order.
pub fn dates_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    (1..=12u32).flat_map(move |month| {
        (1..=days_in_month(year, month)).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
    })
}

/// English month name for `month` (1-12).
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|idx| NAMES.get(idx as usize))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_day_display_is_zero_padded() {
        assert_eq!(MonthDay::new(7, 4).unwrap().to_string(), "07-04");
        assert_eq!(MonthDay::new(12, 31).unwrap().to_string(), "12-31");
    }

    #[test]
    fn test_month_day_rejects_impossible_days() {
        assert!(MonthDay::new(2, 29).is_some());
        assert!(MonthDay::new(2, 30).is_none());
        assert!(MonthDay::new(4, 31).is_none());
        assert!(MonthDay::new(13, 1).is_none());
    }

    #[test]
    fn test_leap_day_only_in_leap_years() {
        let leap_day = MonthDay::new(2, 29).unwrap();
        assert!(leap_day.is_leap_day());
        assert_eq!(leap_day.in_year(2020), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(leap_day.in_year(2021), None);
        assert_eq!(leap_day.in_year(1900), None);
        assert!(leap_day.in_year(2000).is_some());
    }

    #[test]
    fn test_dates_of_year_counts() {
        assert_eq!(dates_of_year(2020).count(), 366);
        assert_eq!(dates_of_year(2021).count(), 365);
        assert_eq!(days_in_year(2024), 366);
    }

    #[test]
    fn test_validate_reference_year() {
        assert_eq!(validate_reference_year(2024), Ok(2024));
        assert!(matches!(
            validate_reference_year(1700),
            Err(HeatmapError::InvalidReferenceYear { year: 1700, .. })
        ));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
    }
}

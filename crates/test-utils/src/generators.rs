//! Deterministic value generators for synthetic daily weather.
//!
//! Values depend only on the month-day of the date, never on the year, so the
//! same generator can feed two years that must align day for day.

use chrono::{Datelike, NaiveDate};

/// Day index of the month-day on a leap-year calendar (Jan 1 = 0, Dec 31 = 365).
fn leap_calendar_ordinal(date: NaiveDate) -> u32 {
    NaiveDate::from_ymd_opt(2000, date.month(), date.day())
        .map(|d| d.ordinal0())
        .unwrap_or(0)
}

/// A smooth annual temperature cycle, coldest mid-January.
///
/// ```
/// use chrono::NaiveDate;
/// use test_utils::seasonal_temperature;
///
/// let jan = seasonal_temperature(NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(), 55.0, 25.0);
/// let jul = seasonal_temperature(NaiveDate::from_ymd_opt(2021, 7, 15).unwrap(), 55.0, 25.0);
/// assert!(jan < jul);
/// ```
pub fn seasonal_temperature(date: NaiveDate, mean: f64, amplitude: f64) -> f64 {
    let phase = (leap_calendar_ordinal(date) as f64 - 14.0) / 366.0 * std::f64::consts::TAU;
    mean - amplitude * phase.cos()
}

/// Precipitation-like values: dry two days out of three, otherwise a small
/// amount that grows through the week.
pub fn precipitation_amount(date: NaiveDate) -> f64 {
    let ordinal = leap_calendar_ordinal(date);
    if ordinal % 3 != 0 {
        0.0
    } else {
        f64::from(ordinal % 7) * 0.13
    }
}

/// A value that increases by `step` for every day of the leap-year calendar.
pub fn ramp_value(date: NaiveDate, start: f64, step: f64) -> f64 {
    start + step * f64::from(leap_calendar_ordinal(date))
}

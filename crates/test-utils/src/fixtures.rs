//! Common test fixtures for calendar heatmap tests.
//!
//! This module provides pre-defined daily series that represent the common
//! shapes the pipeline sees: complete observed years, years with gaps, and
//! climate normals anchored to the synthetic year.

use chrono::NaiveDate;
use heatmap_common::calendar::dates_of_year;
use heatmap_common::metric::fields;
use heatmap_common::{DailyRecord, InputRecord, MonthDay, SeriesInput, NORMALS_ANCHOR_YEAR};

use crate::generators::{precipitation_amount, seasonal_temperature};

/// Shorthand for a valid date; panics on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date must be valid")
}

/// One record for every day of `year`.
pub fn observed_records<F>(year: i32, value: F) -> Vec<DailyRecord>
where
    F: Fn(NaiveDate) -> Option<f64>,
{
    dates_of_year(year)
        .map(|d| DailyRecord::new(d, value(d)))
        .collect()
}

/// Climate-normal records anchored to the synthetic year.
///
/// NOAA normals have no Feb 29 row; pass `include_leap_day` to add one.
pub fn normals_records<F>(include_leap_day: bool, value: F) -> Vec<DailyRecord>
where
    F: Fn(NaiveDate) -> Option<f64>,
{
    dates_of_year(NORMALS_ANCHOR_YEAR)
        .filter(|d| include_leap_day || !MonthDay::from_date(*d).is_leap_day())
        .map(|d| DailyRecord::new(d, value(d)))
        .collect()
}

/// A raw input with one record per day of `year` and the given fields.
pub fn observed_input<F>(year: i32, fields_for: F) -> SeriesInput
where
    F: Fn(NaiveDate) -> Vec<(&'static str, f64)>,
{
    dates_of_year(year)
        .map(|d| {
            fields_for(d)
                .into_iter()
                .fold(InputRecord::new(d), |record, (name, value)| {
                    record.with_field(name, value)
                })
        })
        .collect()
}

/// A complete year of TMAX/TMIN/PRCP/SNOW/AWND readings without TAVG.
pub fn station_year(year: i32) -> SeriesInput {
    observed_input(year, |d| {
        let mean = seasonal_temperature(d, 55.0, 25.0);
        vec![
            (fields::TMAX, mean + 10.0),
            (fields::TMIN, mean - 10.0),
            (fields::PRCP, precipitation_amount(d)),
            (fields::SNOW, 0.0),
            (fields::AWND, 8.0),
        ]
    })
}

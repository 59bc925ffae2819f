//! Daily series normalization.
//!
//! Converts the records of one station/year/metric into a [`CanonicalSeries`]
//! keyed by month-day. Climate normals, whose dates belong to a synthetic
//! year, are re-projected onto the reference year here.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use heatmap_common::calendar::validate_reference_year;
use heatmap_common::metric::fields;
use heatmap_common::{
    DailyRecord, HeatmapError, HeatmapResult, Metric, MetricFamily, MonthDay, SeriesInput,
    SeriesKind,
};

/// The value of one month-day and the date it is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesEntry {
    pub reference_date: NaiveDate,
    pub value: Option<f64>,
}

/// A month-day indexed table for one station/year/metric.
///
/// At most one entry per key. Immutable once built; a new query builds a new
/// series.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSeries {
    reference_year: i32,
    kind: SeriesKind,
    entries: BTreeMap<MonthDay, SeriesEntry>,
}

impl CanonicalSeries {
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &MonthDay) -> Option<&SeriesEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &MonthDay) -> bool {
        self.entries.contains_key(key)
    }

    /// Value for `key`; `None` when the key is missing or its value is absent.
    pub fn value(&self, key: &MonthDay) -> Option<f64> {
        self.entries.get(key).and_then(|e| e.value)
    }

    pub fn reference_date(&self, key: &MonthDay) -> Option<NaiveDate> {
        self.entries.get(key).map(|e| e.reference_date)
    }

    /// Entries in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&MonthDay, &SeriesEntry)> {
        self.entries.iter()
    }

    /// Number of entries that carry a value.
    pub fn present_count(&self) -> usize {
        self.entries.values().filter(|e| e.value.is_some()).count()
    }
}

/// Pick (or derive) the values of `metric` from a raw input.
///
/// Temperature and wind values are rounded to whole units, ties to even.
/// Average temperature falls back to the mean of TMAX and TMIN, rounded after
/// averaging.
pub fn extract_metric(input: &SeriesInput, metric: Metric) -> HeatmapResult<Vec<DailyRecord>> {
    let family = metric.family();
    let field = metric.field();

    if input.has_field(field) {
        return Ok(input
            .records
            .iter()
            .map(|r| DailyRecord::new(r.date, finite(r.get(field)).map(|v| round_for(family, v))))
            .collect());
    }

    if metric == Metric::AverageTemperature
        && input.has_field(fields::TMAX)
        && input.has_field(fields::TMIN)
    {
        debug!("No TAVG column, deriving average temperature from TMAX/TMIN");
        return Ok(input
            .records
            .iter()
            .map(|r| {
                let mean = match (finite(r.get(fields::TMAX)), finite(r.get(fields::TMIN))) {
                    (Some(high), Some(low)) => Some(((high + low) / 2.0).round_ties_even()),
                    _ => None,
                };
                DailyRecord::new(r.date, mean)
            })
            .collect());
    }

    Err(HeatmapError::MissingMetric {
        metric: field.to_string(),
        available: input
            .fields
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Build a canonical series from `records`.
///
/// Observed records keep their own date and must belong to `reference_year`;
/// records from other years are ignored. Climate-normal records are projected
/// onto `reference_year` through their month-day key, so `02-29` survives only
/// when `reference_year` is a leap year. The first record seen for a key wins.
pub fn normalize(
    records: &[DailyRecord],
    reference_year: i32,
    kind: SeriesKind,
) -> HeatmapResult<CanonicalSeries> {
    validate_reference_year(reference_year)?;

    let mut entries = BTreeMap::new();
    let mut duplicates = 0usize;
    let mut skipped = 0usize;

    for record in records {
        let key = MonthDay::from_date(record.date);
        let reference_date = match kind {
            SeriesKind::Observed => (record.date.year() == reference_year).then_some(record.date),
            SeriesKind::ClimateNormal => key.in_year(reference_year),
        };
        let Some(reference_date) = reference_date else {
            skipped += 1;
            continue;
        };

        match entries.entry(key) {
            Entry::Occupied(_) => duplicates += 1,
            Entry::Vacant(slot) => {
                slot.insert(SeriesEntry {
                    reference_date,
                    value: finite(record.value),
                });
            }
        }
    }

    if duplicates > 0 || skipped > 0 {
        debug!(
            duplicates,
            skipped,
            reference_year,
            ?kind,
            "Dropped records while normalizing"
        );
    }

    let series = CanonicalSeries {
        reference_year,
        kind,
        entries,
    };

    if series.present_count() == 0 {
        let what = match kind {
            SeriesKind::Observed => "observed series",
            SeriesKind::ClimateNormal => "climate normals",
        };
        return Err(HeatmapError::EmptySeries(format!(
            "{} projected onto {}",
            what, reference_year
        )));
    }

    debug!(
        entries = series.len(),
        present = series.present_count(),
        reference_year,
        "Normalized series"
    );

    Ok(series)
}

/// Extract `metric` from `input` and normalize it in one step.
pub fn build_series(
    input: &SeriesInput,
    metric: Metric,
    reference_year: i32,
    kind: SeriesKind,
) -> HeatmapResult<CanonicalSeries> {
    let records = extract_metric(input, metric)?;
    normalize(&records, reference_year, kind)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn round_for(family: MetricFamily, value: f64) -> f64 {
    if family.rounds_to_whole() {
        value.round_ties_even()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::InputRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_day(fields: &[(&str, f64)]) -> SeriesInput {
        let record = fields
            .iter()
            .fold(InputRecord::new(date(2021, 6, 1)), |r, (name, value)| {
                r.with_field(*name, *value)
            });
        std::iter::once(record).collect()
    }

    #[test]
    fn test_average_derived_from_high_and_low() {
        let input = one_day(&[("TMAX", 43.0), ("TMIN", 20.0)]);
        let records = extract_metric(&input, Metric::AverageTemperature).unwrap();
        // 31.5 rounds to the even neighbour
        assert_eq!(records[0].value, Some(32.0));

        let input = one_day(&[("TMAX", 41.0), ("TMIN", 20.0)]);
        let records = extract_metric(&input, Metric::AverageTemperature).unwrap();
        assert_eq!(records[0].value, Some(30.0));
    }

    #[test]
    fn test_direct_average_is_preferred() {
        let input = one_day(&[("TMAX", 80.0), ("TMIN", 60.0), ("TAVG", 65.0)]);
        let records = extract_metric(&input, Metric::AverageTemperature).unwrap();
        assert_eq!(records[0].value, Some(65.0));
    }

    #[test]
    fn test_average_without_inputs_is_missing_metric() {
        let input = one_day(&[("TMAX", 80.0), ("PRCP", 0.1)]);
        let err = extract_metric(&input, Metric::AverageTemperature).unwrap_err();
        assert!(matches!(err, HeatmapError::MissingMetric { ref metric, .. } if metric == "TAVG"));
    }

    #[test]
    fn test_derived_average_absent_when_one_side_missing() {
        let mut input = one_day(&[("TMAX", 80.0), ("TMIN", 60.0)]);
        input.push(InputRecord::new(date(2021, 6, 2)).with_field("TMAX", 81.0));
        let records = extract_metric(&input, Metric::AverageTemperature).unwrap();
        assert_eq!(records[0].value, Some(70.0));
        assert_eq!(records[1].value, None);
    }

    #[test]
    fn test_temperature_rounded_precipitation_kept() {
        let input = one_day(&[("TMAX", 40.6), ("PRCP", 0.057)]);
        let high = extract_metric(&input, Metric::HighTemperature).unwrap();
        let rain = extract_metric(&input, Metric::Precipitation).unwrap();
        assert_eq!(high[0].value, Some(41.0));
        assert_eq!(rain[0].value, Some(0.057));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let records = vec![
            DailyRecord::new(date(2021, 3, 1), Some(1.0)),
            DailyRecord::new(date(2021, 3, 1), Some(2.0)),
        ];
        let series = normalize(&records, 2021, SeriesKind::Observed).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.value(&MonthDay::new(3, 1).unwrap()), Some(1.0));
    }

    #[test]
    fn test_observed_records_from_other_years_are_ignored() {
        let records = vec![
            DailyRecord::new(date(2020, 12, 31), Some(5.0)),
            DailyRecord::new(date(2021, 1, 1), Some(6.0)),
        ];
        let series = normalize(&records, 2021, SeriesKind::Observed).unwrap();
        assert_eq!(series.len(), 1);
        assert!(!series.contains(&MonthDay::new(12, 31).unwrap()));
    }

    #[test]
    fn test_all_absent_is_empty_series() {
        let records = vec![DailyRecord::new(date(2021, 3, 1), None)];
        let err = normalize(&records, 2021, SeriesKind::Observed).unwrap_err();
        assert!(matches!(err, HeatmapError::EmptySeries(_)));

        let err = normalize(&[], 2021, SeriesKind::Observed).unwrap_err();
        assert!(matches!(err, HeatmapError::EmptySeries(_)));
    }

    #[test]
    fn test_non_finite_values_are_absent() {
        let records = vec![
            DailyRecord::new(date(2021, 3, 1), Some(f64::NAN)),
            DailyRecord::new(date(2021, 3, 2), Some(3.0)),
        ];
        let series = normalize(&records, 2021, SeriesKind::Observed).unwrap();
        assert_eq!(series.value(&MonthDay::new(3, 1).unwrap()), None);
        assert!(series.contains(&MonthDay::new(3, 1).unwrap()));
    }

    #[test]
    fn test_invalid_reference_year() {
        let records = vec![DailyRecord::new(date(2021, 3, 1), Some(1.0))];
        let err = normalize(&records, 3000, SeriesKind::ClimateNormal).unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidReferenceYear { year: 3000, .. }));
    }
}

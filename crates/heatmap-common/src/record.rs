//! Daily records as they arrive from a data source and as they leave the aligner.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthDay;

/// One day of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// Whether a series holds real observations or climatological normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Observed,
    /// Dates are anchored to [`crate::NORMALS_ANCHOR_YEAR`].
    ClimateNormal,
}

/// One day as delivered by a source: every field it had a number for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub date: NaiveDate,
    pub fields: BTreeMap<String, f64>,
}

impl InputRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }
}

/// Tabular contract between the fetch layer and the normalizer.
///
/// `fields` lists every field the source provided a column for, even when no
/// record carries a value for it, so a missing column can be told apart from
/// a column of gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesInput {
    pub records: Vec<InputRecord>,
    pub fields: BTreeSet<String>,
}

impl SeriesInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a column as present.
    pub fn declare_field(&mut self, name: impl Into<String>) {
        self.fields.insert(name.into());
    }

    /// Append a record, declaring every field it carries.
    pub fn push(&mut self, record: InputRecord) {
        for name in record.fields.keys() {
            if !self.fields.contains(name) {
                self.fields.insert(name.clone());
            }
        }
        self.records.push(record);
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<InputRecord> for SeriesInput {
    fn from_iter<I: IntoIterator<Item = InputRecord>>(iter: I) -> Self {
        let mut input = SeriesInput::new();
        for record in iter {
            input.push(record);
        }
        input
    }
}

/// One cell of the calendar after alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedCell {
    pub month_day: MonthDay,
    pub display_date: NaiveDate,
    pub value: Option<f64>,
}

impl AlignedCell {
    pub fn new(display_date: NaiveDate, value: Option<f64>) -> Self {
        Self {
            month_day: MonthDay::from_date(display_date),
            display_date,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_push_declares_fields() {
        let mut input = SeriesInput::new();
        input.push(InputRecord::new(date(2021, 1, 1)).with_field("TMAX", 40.0));
        input.push(InputRecord::new(date(2021, 1, 2)).with_field("TMIN", 20.0));

        assert!(input.has_field("TMAX"));
        assert!(input.has_field("TMIN"));
        assert!(!input.has_field("TAVG"));
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_declared_field_without_values() {
        let mut input = SeriesInput::new();
        input.declare_field("SNOW");
        input.push(InputRecord::new(date(2021, 1, 1)));

        assert!(input.has_field("SNOW"));
        assert_eq!(input.records[0].get("SNOW"), None);
    }

    #[test]
    fn test_aligned_cell_derives_key() {
        let cell = AlignedCell::new(date(2024, 2, 29), Some(3.0));
        assert_eq!(cell.month_day.to_string(), "02-29");
    }
}

//! Series alignment.
//!
//! Each [`AlignmentPolicy`] names its join key and what happens to a key
//! present on only one side:
//!
//! | Policy | Join key | Cells produced | Display date |
//! |---|---|---|---|
//! | `SameCalendarDay` | date on the primary's calendar | union of both sides | that date |
//! | `SameDayOfYear` | month-day | every primary key | primary's date |
//! | `Identity` | - | every primary key | primary's date |
//!
//! A comparison value is `primary - secondary`. An absent side makes the cell
//! absent; it is never read as zero.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use heatmap_common::{AlignedCell, HeatmapError, HeatmapResult, MonthDay};

use crate::normalize::CanonicalSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Single series, no comparison.
    Identity,
    /// Two stations, same year. Full outer join on the date, with the
    /// secondary's keys placed on the primary's reference year.
    SameCalendarDay,
    /// Same station in two years, or actual vs. climate normal. Left join on
    /// the month-day key, years ignored.
    SameDayOfYear,
}

impl AlignmentPolicy {
    pub fn is_comparison(&self) -> bool {
        !matches!(self, AlignmentPolicy::Identity)
    }
}

impl fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlignmentPolicy::Identity => "identity",
            AlignmentPolicy::SameCalendarDay => "calendar day",
            AlignmentPolicy::SameDayOfYear => "day of year",
        };
        f.write_str(name)
    }
}

/// Combine `primary` and `secondary` under `policy`.
///
/// Comparison policies fail with [`HeatmapError::NoOverlap`] when no cell has a
/// value on both sides. `Identity` ignores `secondary`.
pub fn align(
    primary: &CanonicalSeries,
    secondary: &CanonicalSeries,
    policy: AlignmentPolicy,
) -> HeatmapResult<Vec<AlignedCell>> {
    let cells = match policy {
        AlignmentPolicy::Identity => return Ok(passthrough(primary)),
        AlignmentPolicy::SameCalendarDay => join_on_date(primary, secondary),
        AlignmentPolicy::SameDayOfYear => join_on_month_day(primary, secondary),
    };

    let matched = cells.iter().filter(|c| c.value.is_some()).count();
    debug!(
        %policy,
        cells = cells.len(),
        matched,
        primary_year = primary.reference_year(),
        secondary_year = secondary.reference_year(),
        "Aligned series"
    );

    if matched == 0 {
        return Err(HeatmapError::NoOverlap(policy.to_string()));
    }

    Ok(cells)
}

/// One cell per entry of `series`, carrying its own value.
pub fn passthrough(series: &CanonicalSeries) -> Vec<AlignedCell> {
    series
        .iter()
        .map(|(key, entry)| AlignedCell {
            month_day: *key,
            display_date: entry.reference_date,
            value: entry.value,
        })
        .collect()
}

/// Full outer join on the calendar date, read on the primary's calendar.
///
/// Each key of either side is placed on its date in the primary's reference
/// year. A secondary-only key with no such date (`02-29` against a common
/// year) keeps the secondary's own reference date.
fn join_on_date(primary: &CanonicalSeries, secondary: &CanonicalSeries) -> Vec<AlignedCell> {
    let year = primary.reference_year();
    let keys: BTreeSet<MonthDay> = primary
        .iter()
        .chain(secondary.iter())
        .map(|(key, _)| *key)
        .collect();

    keys.into_iter()
        .filter_map(|key| {
            let display_date = primary
                .reference_date(&key)
                .or_else(|| key.in_year(year))
                .or_else(|| secondary.reference_date(&key))?;
            Some(AlignedCell {
                month_day: key,
                display_date,
                value: difference(primary.value(&key), secondary.value(&key)),
            })
        })
        .collect()
}

fn join_on_month_day(primary: &CanonicalSeries, secondary: &CanonicalSeries) -> Vec<AlignedCell> {
    primary
        .iter()
        .map(|(key, entry)| AlignedCell {
            month_day: *key,
            display_date: entry.reference_date,
            value: difference(entry.value, secondary.value(key)),
        })
        .collect()
}

fn difference(primary: Option<f64>, secondary: Option<f64>) -> Option<f64> {
    match (primary, secondary) {
        (Some(p), Some(s)) => Some(p - s),
        _ => None,
    }
}

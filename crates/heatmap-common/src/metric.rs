//! Weather metrics and the field names they are read from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical field names of a daily record.
pub mod fields {
    pub const TMAX: &str = "TMAX";
    pub const TMIN: &str = "TMIN";
    pub const TAVG: &str = "TAVG";
    pub const PRCP: &str = "PRCP";
    pub const SNOW: &str = "SNOW";
    pub const AWND: &str = "AWND";

    /// Every field a daily series may carry.
    pub const ALL: [&str; 6] = [TMAX, TMIN, TAVG, PRCP, SNOW, AWND];
}

/// A plottable daily quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    HighTemperature,
    LowTemperature,
    AverageTemperature,
    Precipitation,
    Snowfall,
    WindSpeed,
}

/// Metrics grouped by the scale and formatting rules they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricFamily {
    Temperature,
    Precipitation,
    Snowfall,
    Wind,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::HighTemperature,
        Metric::LowTemperature,
        Metric::AverageTemperature,
        Metric::Precipitation,
        Metric::Snowfall,
        Metric::WindSpeed,
    ];

    /// Field this metric is read from.
    pub fn field(&self) -> &'static str {
        match self {
            Metric::HighTemperature => fields::TMAX,
            Metric::LowTemperature => fields::TMIN,
            Metric::AverageTemperature => fields::TAVG,
            Metric::Precipitation => fields::PRCP,
            Metric::Snowfall => fields::SNOW,
            Metric::WindSpeed => fields::AWND,
        }
    }

    pub fn family(&self) -> MetricFamily {
        match self {
            Metric::HighTemperature | Metric::LowTemperature | Metric::AverageTemperature => {
                MetricFamily::Temperature
            }
            Metric::Precipitation => MetricFamily::Precipitation,
            Metric::Snowfall => MetricFamily::Snowfall,
            Metric::WindSpeed => MetricFamily::Wind,
        }
    }

    /// Title-case name used in chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::HighTemperature => "High Temperature",
            Metric::LowTemperature => "Low Temperature",
            Metric::AverageTemperature => "Average Temperature",
            Metric::Precipitation => "Precipitation",
            Metric::Snowfall => "Snowfall",
            Metric::WindSpeed => "Wind Speed",
        }
    }

    /// Identifier accepted by `FromStr`.
    pub fn id(&self) -> &'static str {
        match self {
            Metric::HighTemperature => "high-temperature",
            Metric::LowTemperature => "low-temperature",
            Metric::AverageTemperature => "average-temperature",
            Metric::Precipitation => "precipitation",
            Metric::Snowfall => "snowfall",
            Metric::WindSpeed => "wind-speed",
        }
    }
}

impl MetricFamily {
    /// Whether values of this family are stored as whole units.
    pub fn rounds_to_whole(&self) -> bool {
        matches!(self, MetricFamily::Temperature | MetricFamily::Wind)
    }

    pub fn id(&self) -> &'static str {
        match self {
            MetricFamily::Temperature => "temperature",
            MetricFamily::Precipitation => "precipitation",
            MetricFamily::Snowfall => "snowfall",
            MetricFamily::Wind => "wind",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown metric '{0}' (expected one of: high-temperature, low-temperature, average-temperature, precipitation, snowfall, wind-speed)")]
pub struct ParseMetricError(pub String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Metric::ALL
            .into_iter()
            .find(|m| m.id() == wanted || m.field().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

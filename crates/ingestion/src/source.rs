//! The fetch contract between data sources and the series pipeline.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use heatmap_common::SeriesInput;

use crate::error::Result;

/// Which upstream table a request reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Observed daily values for one calendar year.
    DailySummaries,
    /// 1991-2020 daily climate normals, dated in the anchor year 2000.
    DailyNormals,
}

/// One station/dataset/year to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchRequest {
    pub station: String,
    pub dataset: Dataset,
    /// Required for daily summaries, ignored for normals.
    pub year: Option<i32>,
}

impl FetchRequest {
    pub fn daily_summaries(station: impl Into<String>, year: i32) -> Self {
        Self {
            station: station.into(),
            dataset: Dataset::DailySummaries,
            year: Some(year),
        }
    }

    pub fn daily_normals(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            dataset: Dataset::DailyNormals,
            year: None,
        }
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.dataset, self.year) {
            (Dataset::DailySummaries, Some(year)) => write!(f, "{} daily summaries {}", self.station, year),
            (Dataset::DailySummaries, None) => write!(f, "{} daily summaries", self.station),
            (Dataset::DailyNormals, _) => write!(f, "{} daily normals", self.station),
        }
    }
}

/// A fetched table and the station name to show in titles.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSeries {
    pub input: SeriesInput,
    pub display_name: String,
}

/// A provider of daily series.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Stable name, part of the cache key.
    fn name(&self) -> &str;

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedSeries>;
}

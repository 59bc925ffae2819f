//! One heatmap query, from fetch to rendered calendar.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use heatmap_common::calendar::validate_reference_year;
use heatmap_common::{AlignedCell, HeatmapError, Metric, SeriesKind};
use ingestion::{FetchError, FetchRequest, FetchedSeries, SeriesFetcher, SeriesSource};
use renderer::{render_calendar, CalendarImage, GridLayout, LabelFont, RenderError, RenderMode, StyleSet};
use series::{align, build_series, passthrough, AlignmentPolicy};

/// What the primary series is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Plain values, no comparison.
    None,
    /// Same station, another year.
    Years { year2: i32 },
    /// Another station, same year.
    Stations { station2: String },
    /// Same station, 1991-2020 daily normals.
    Normals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapQuery {
    pub station: String,
    pub year: i32,
    pub metric: Metric,
    pub comparison: Comparison,
}

impl HeatmapQuery {
    pub fn single(station: impl Into<String>, year: i32, metric: Metric) -> Self {
        Self {
            station: station.into(),
            year,
            metric,
            comparison: Comparison::None,
        }
    }

    pub fn two_years(station: impl Into<String>, year: i32, year2: i32, metric: Metric) -> Self {
        Self {
            comparison: Comparison::Years { year2 },
            ..Self::single(station, year, metric)
        }
    }

    pub fn two_stations(
        station: impl Into<String>,
        station2: impl Into<String>,
        year: i32,
        metric: Metric,
    ) -> Self {
        Self {
            comparison: Comparison::Stations {
                station2: station2.into(),
            },
            ..Self::single(station, year, metric)
        }
    }

    pub fn anomaly(station: impl Into<String>, year: i32, metric: Metric) -> Self {
        Self {
            comparison: Comparison::Normals,
            ..Self::single(station, year, metric)
        }
    }

    pub fn policy(&self) -> AlignmentPolicy {
        match self.comparison {
            Comparison::None => AlignmentPolicy::Identity,
            Comparison::Stations { .. } => AlignmentPolicy::SameCalendarDay,
            Comparison::Years { .. } | Comparison::Normals => AlignmentPolicy::SameDayOfYear,
        }
    }

    pub fn mode(&self) -> RenderMode {
        match self.comparison {
            Comparison::None => RenderMode::Absolute,
            _ => RenderMode::Differential,
        }
    }

    /// Checks that need no data: station ids present, years supported.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.station.trim().is_empty() {
            return Err(QueryError::InvalidQuery("a station id is required".to_string()));
        }
        validate_reference_year(self.year)?;
        match &self.comparison {
            Comparison::Years { year2 } => {
                validate_reference_year(*year2)?;
            }
            Comparison::Stations { station2 } if station2.trim().is_empty() => {
                return Err(QueryError::InvalidQuery(
                    "a second station id is required to compare stations".to_string(),
                ));
            }
            _ => {}
        }
        Ok(())
    }

    fn primary_request(&self) -> FetchRequest {
        FetchRequest::daily_summaries(&self.station, self.year)
    }

    fn secondary_request(&self) -> Option<FetchRequest> {
        match &self.comparison {
            Comparison::None => None,
            Comparison::Years { year2 } => Some(FetchRequest::daily_summaries(&self.station, *year2)),
            Comparison::Stations { station2 } => {
                Some(FetchRequest::daily_summaries(station2, self.year))
            }
            Comparison::Normals => Some(FetchRequest::daily_normals(&self.station)),
        }
    }

    fn title(&self, name: &str, name2: Option<&str>) -> String {
        let metric = self.metric.label();
        match &self.comparison {
            Comparison::None => format!("{}\n{} ({})", name, metric, self.year),
            Comparison::Years { year2 } => {
                format!("{}: {} vs {}\n{}", name, self.year, year2, metric)
            }
            Comparison::Stations { station2 } => format!(
                "{} vs {}\n{} ({})",
                name,
                name2.unwrap_or(station2),
                metric,
                self.year
            ),
            Comparison::Normals => {
                format!("{}: {} vs 1991-2020 Normals\n{}", name, self.year, metric)
            }
        }
    }
}

/// Which side of a comparison a fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Secondary,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => f.write_str("primary"),
            Role::Secondary => f.write_str("comparison"),
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Fetching {role} series failed: {source}")]
    Fetch {
        role: Role,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Core(#[from] HeatmapError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl QueryError {
    /// True when the data needed is not there (nothing fetched, nothing left
    /// after normalizing, nothing overlapping), as opposed to data present but
    /// unusable.
    pub fn is_data_unavailable(&self) -> bool {
        match self {
            QueryError::Fetch { .. } => true,
            QueryError::Core(e) => e.is_data_unavailable(),
            QueryError::Render(RenderError::Core(e)) => e.is_data_unavailable(),
            QueryError::InvalidQuery(_) | QueryError::Render(_) => false,
        }
    }

    /// Message suitable for the end user.
    pub fn user_message(&self) -> String {
        match self {
            QueryError::Fetch {
                role,
                source: FetchError::NotFound(what),
            } => format!("No data found for the {} series ({}).", role, what),
            QueryError::Fetch { role, source } => {
                format!("Could not fetch the {} series: {}", role, source)
            }
            QueryError::Core(HeatmapError::NoOverlap(_)) => {
                "The two series share no days with data on both sides.".to_string()
            }
            e if e.is_data_unavailable() => format!("No data available: {}", e),
            e => format!("Cannot render this query: {}", e),
        }
    }
}

/// Everything a query renders with.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub styles: &'a StyleSet,
    pub layout: &'a GridLayout,
    pub font: Option<&'a LabelFont>,
}

/// Result of a successful query.
#[derive(Debug, Clone)]
pub struct HeatmapOutput {
    pub title: String,
    pub mode: RenderMode,
    pub cells: Vec<AlignedCell>,
    pub image: CalendarImage,
}

/// Fetch, normalize, align and render `query`.
#[instrument(skip(source, fetcher, ctx), fields(station = %query.station, year = query.year))]
pub async fn run_query(
    query: &HeatmapQuery,
    source: &dyn SeriesSource,
    fetcher: &SeriesFetcher,
    ctx: RenderContext<'_>,
) -> Result<HeatmapOutput, QueryError> {
    query.validate()?;

    let primary_request = query.primary_request();
    let (primary, secondary) = match query.secondary_request() {
        None => (fetcher.fetch(source, &primary_request).await, None),
        Some(secondary_request) => {
            let (p, s) = fetcher
                .fetch_pair((source, &primary_request), (source, &secondary_request))
                .await;
            (p, Some(s))
        }
    };
    let primary = primary.map_err(|source| QueryError::Fetch {
        role: Role::Primary,
        source,
    })?;
    let secondary: Option<Arc<FetchedSeries>> = secondary
        .transpose()
        .map_err(|source| QueryError::Fetch {
            role: Role::Secondary,
            source,
        })?;

    let primary_series = build_series(&primary.input, query.metric, query.year, SeriesKind::Observed)?;

    let cells = match (&query.comparison, &secondary) {
        (Comparison::None, _) | (_, None) => passthrough(&primary_series),
        (comparison, Some(other)) => {
            let (year, kind) = match comparison {
                Comparison::Years { year2 } => (*year2, SeriesKind::Observed),
                Comparison::Normals => (query.year, SeriesKind::ClimateNormal),
                _ => (query.year, SeriesKind::Observed),
            };
            let secondary_series = build_series(&other.input, query.metric, year, kind)?;
            align(&primary_series, &secondary_series, query.policy())?
        }
    };

    let title = query.title(
        &primary.display_name,
        secondary.as_ref().map(|s| s.display_name.as_str()),
    );
    let mode = query.mode();
    let policy = ctx.styles.policy(query.metric.family(), mode);
    let image = render_calendar(&cells, query.year, &policy, &title, ctx.layout, ctx.font)?;

    info!(
        cells = cells.len(),
        with_values = cells.iter().filter(|c| c.value.is_some()).count(),
        policy = %query.policy(),
        "Rendered heatmap"
    );

    Ok(HeatmapOutput {
        title,
        mode,
        cells,
        image,
    })
}

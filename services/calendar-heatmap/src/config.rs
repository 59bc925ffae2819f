//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use heatmap_common::Metric;
use ingestion::{NoaaConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_CAPACITY};
use renderer::{GridLayout, StyleError, StyleSet, MAX_CELL_SIZE, MIN_CELL_SIZE};

use crate::query::HeatmapQuery;

#[derive(Parser, Debug)]
#[command(name = "calendar-heatmap")]
#[command(about = "Render a year of NOAA daily data as a calendar heatmap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One station, one year
    Single {
        #[arg(long)]
        station: String,
        #[arg(long)]
        year: i32,
    },
    /// One station, difference between two years
    TwoYears {
        #[arg(long)]
        station: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        compare_year: i32,
    },
    /// Two stations, difference over the same year
    TwoStations {
        #[arg(long)]
        station: String,
        #[arg(long)]
        station2: String,
        #[arg(long)]
        year: i32,
    },
    /// One station, difference from its 1991-2020 daily normals
    Anomaly {
        #[arg(long)]
        station: String,
        #[arg(long)]
        year: i32,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CommonOptions {
    /// Metric to plot (high-temperature, low-temperature, average-temperature,
    /// precipitation, snowfall, wind-speed)
    #[arg(long, global = true, default_value = "high-temperature")]
    pub metric: Metric,

    /// PNG output path
    #[arg(short, long, global = true, default_value = "heatmap.png")]
    pub output: PathBuf,

    /// Also write the aligned cells as JSON
    #[arg(long, global = true)]
    pub cells_json: Option<PathBuf>,

    /// JSON file overriding color scales and contrast thresholds
    #[arg(long, global = true, env = "HEATMAP_STYLE")]
    pub style: Option<PathBuf>,

    /// TrueType font for labels (default: first system font found)
    #[arg(long, global = true, env = "HEATMAP_FONT")]
    pub font: Option<PathBuf>,

    /// Cell edge in pixels
    #[arg(
        long,
        global = true,
        default_value = "40",
        value_parser = clap::value_parser!(u32).range(MIN_CELL_SIZE as i64..=MAX_CELL_SIZE as i64)
    )]
    pub cell_size: u32,

    /// Overall timeout per fetch, in seconds
    #[arg(long, global = true, env = "FETCH_TIMEOUT_SECS", default_value = "30")]
    pub fetch_timeout_secs: u64,

    /// Fetched series kept in memory
    #[arg(long, global = true, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// NOAA NCEI base URL
    #[arg(long, global = true, env = "NOAA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub noaa_base_url: String,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl Cli {
    pub fn to_query(&self) -> HeatmapQuery {
        let metric = self.common.metric;
        match &self.command {
            Command::Single { station, year } => HeatmapQuery::single(station, *year, metric),
            Command::TwoYears {
                station,
                year,
                compare_year,
            } => HeatmapQuery::two_years(station, *year, *compare_year, metric),
            Command::TwoStations {
                station,
                station2,
                year,
            } => HeatmapQuery::two_stations(station, station2, *year, metric),
            Command::Anomaly { station, year } => HeatmapQuery::anomaly(station, *year, metric),
        }
    }
}

impl CommonOptions {
    /// Built-in styles, with the `--style` file applied on top if given.
    pub fn load_styles(&self) -> Result<StyleSet, StyleError> {
        match &self.style {
            Some(path) => StyleSet::from_file(path),
            None => Ok(StyleSet::builtin()),
        }
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout::with_cell_size(self.cell_size)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    pub fn noaa_config(&self) -> NoaaConfig {
        NoaaConfig {
            base_url: self.noaa_base_url.clone(),
            request_timeout: self.fetch_timeout(),
        }
    }
}

//! Calendar heatmap service.
//!
//! Turns a query (station, year, metric, optional comparison) into a rendered
//! calendar: fetch through the shared cache, normalize, align, color, render.

pub mod config;
pub mod query;

pub use config::{Cli, Command, CommonOptions};
pub use query::{run_query, Comparison, HeatmapOutput, HeatmapQuery, QueryError, RenderContext, Role};

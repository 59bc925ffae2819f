//! Common types shared across the calendar heatmap crates.

pub mod calendar;
pub mod error;
pub mod metric;
pub mod record;

pub use calendar::{MonthDay, NORMALS_ANCHOR_YEAR, SUPPORTED_YEARS};
pub use error::{HeatmapError, HeatmapResult};
pub use metric::{Metric, MetricFamily};
pub use record::{AlignedCell, DailyRecord, InputRecord, SeriesInput, SeriesKind};

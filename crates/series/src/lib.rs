//! Reconciliation of daily weather series onto a month-day calendar.
//!
//! - [`normalize`]: raw records to a [`CanonicalSeries`]
//! - [`align`]: two canonical series to calendar cells under an [`AlignmentPolicy`]

pub mod align;
pub mod normalize;

pub use align::{align, passthrough, AlignmentPolicy};
pub use normalize::{build_series, extract_metric, normalize, CanonicalSeries, SeriesEntry};

//! Error types for the reconciliation core.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Failures raised by the normalizer, aligner and renderer.
///
/// The color engine has no error type: every value maps to a color.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeatmapError {
    #[error("Metric '{metric}' is not present in the data and cannot be derived (fields: {available})")]
    MissingMetric { metric: String, available: String },

    #[error("No usable records for {0}")]
    EmptySeries(String),

    #[error("Series share no {0} with values on both sides")]
    NoOverlap(String),

    #[error("Reference year {year} is outside the supported range {min}..={max}")]
    InvalidReferenceYear { year: i32, min: i32, max: i32 },
}

impl HeatmapError {
    /// True when the error means "there is nothing to draw" rather than
    /// "the request itself is invalid".
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            HeatmapError::EmptySeries(_) | HeatmapError::NoOverlap(_)
        )
    }
}

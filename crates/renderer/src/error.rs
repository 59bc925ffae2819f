//! Error types for rendering.

use heatmap_common::HeatmapError;
use thiserror::Error;

/// Failures while drawing or encoding a calendar.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] HeatmapError),

    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("Failed to load font from {path}: {message}")]
    FontLoad { path: String, message: String },

    #[error("Invalid grid layout: {0}")]
    InvalidLayout(String),
}

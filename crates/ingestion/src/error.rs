//! Error types for the ingestion crate.

use thiserror::Error;

/// Errors that can occur while fetching a series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("No data found: {0}")]
    NotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

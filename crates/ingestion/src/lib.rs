//! Daily weather series sources.
//!
//! - [`SeriesSource`]: the fetch contract, one station/dataset/year per call
//! - [`NoaaClient`]: NOAA NCEI daily summaries and daily climate normals
//! - [`SeriesFetcher`]: timeouts, a bounded [`FetchCache`] and paired fetches

pub mod cache;
pub mod error;
pub mod fanout;
pub mod noaa;
pub mod source;

pub use cache::{CacheStats, FetchCache, DEFAULT_CACHE_CAPACITY};
pub use error::{FetchError, Result};
pub use fanout::{fetch_with_timeout, SeriesFetcher, DEFAULT_FETCH_TIMEOUT};
pub use noaa::{parse_csv, title_case, NoaaClient, NoaaConfig, DEFAULT_BASE_URL};
pub use source::{Dataset, FetchRequest, FetchedSeries, SeriesSource};

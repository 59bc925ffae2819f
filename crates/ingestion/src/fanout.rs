//! Cached, time-bounded fetching of one or two series at once.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::cache::FetchCache;
use crate::error::{FetchError, Result};
use crate::source::{FetchRequest, FetchedSeries, SeriesSource};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `source.fetch` under `timeout`. Expiry is reported as
/// [`FetchError::UpstreamUnavailable`].
pub async fn fetch_with_timeout(
    source: &dyn SeriesSource,
    request: &FetchRequest,
    timeout: Duration,
) -> Result<FetchedSeries> {
    match tokio::time::timeout(timeout, source.fetch(request)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(source = source.name(), %request, ?timeout, "Fetch timed out");
            Err(FetchError::UpstreamUnavailable(format!(
                "{} from {} timed out after {}s",
                request,
                source.name(),
                timeout.as_secs_f64()
            )))
        }
    }
}

/// Fetches series through a shared [`FetchCache`].
#[derive(Clone)]
pub struct SeriesFetcher {
    cache: Arc<FetchCache>,
    timeout: Duration,
}

impl SeriesFetcher {
    pub fn new(cache: Arc<FetchCache>, timeout: Duration) -> Self {
        Self { cache, timeout }
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cached fetch. Only successful results are stored.
    #[instrument(skip(self, source), fields(source = source.name()))]
    pub async fn fetch(
        &self,
        source: &dyn SeriesSource,
        request: &FetchRequest,
    ) -> Result<Arc<FetchedSeries>> {
        if let Some(series) = self.cache.get(source.name(), request).await {
            return Ok(series);
        }

        let series = Arc::new(fetch_with_timeout(source, request, self.timeout).await?);
        debug!(records = series.input.len(), "Fetched series");
        self.cache
            .insert(source.name(), request, Arc::clone(&series))
            .await;
        Ok(series)
    }

    /// Fetch two series concurrently and wait for both.
    ///
    /// Each side keeps its own result; a failure or timeout on one side does
    /// not cancel the other.
    pub async fn fetch_pair(
        &self,
        first: (&dyn SeriesSource, &FetchRequest),
        second: (&dyn SeriesSource, &FetchRequest),
    ) -> (Result<Arc<FetchedSeries>>, Result<Arc<FetchedSeries>>) {
        tokio::join!(
            self.fetch(first.0, first.1),
            self.fetch(second.0, second.1)
        )
    }
}

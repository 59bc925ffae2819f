//! In-memory LRU cache of fetched series.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

use crate::source::{FetchRequest, FetchedSeries};

pub const DEFAULT_CACHE_CAPACITY: usize = 32;

type CacheKey = (String, FetchRequest);

/// Bounded cache from `(source name, request)` to a fetched series.
///
/// Entries are shared by `Arc` and never invalidated; the least recently used
/// entry is evicted when the cache is full. Failures are never stored.
pub struct FetchCache {
    entries: Mutex<LruCache<CacheKey, Arc<FetchedSeries>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl FetchCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a cached series, counting the hit or miss.
    pub async fn get(&self, source: &str, request: &FetchRequest) -> Option<Arc<FetchedSeries>> {
        let key = (source.to_string(), request.clone());
        let found = self.entries.lock().await.get(&key).cloned();
        match found {
            Some(series) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(source, %request, "Fetch cache hit");
                Some(series)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn insert(
        &self,
        source: &str,
        request: &FetchRequest,
        series: Arc<FetchedSeries>,
    ) {
        let mut entries = self.entries.lock().await;
        if let Some(((evicted_source, evicted), _)) =
            entries.push((source.to_string(), request.clone()), series)
        {
            if evicted_source != source || &evicted != request {
                debug!(source = %evicted_source, request = %evicted, "Evicted from fetch cache");
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

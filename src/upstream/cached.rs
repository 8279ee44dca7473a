//! Cached-Fetch Orchestrator
//!
//! Read-through cache in front of a [`JsonFetcher`]. Every route handler
//! reaches the upstream catalog through [`CachedFetcher::cached_fetch`].

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::upstream::{HttpFetcher, JsonFetcher};

// == Cached Fetcher ==
/// Combines an optional [`CacheStore`] with an upstream fetcher.
///
/// The store lock is taken separately for the lookup and for the write-back
/// and is never held across the network call. Two concurrent misses on the
/// same URL therefore both reach upstream and both populate the cache; there
/// is no in-flight de-duplication.
pub struct CachedFetcher {
    cache: Option<RwLock<CacheStore>>,
    fetcher: Arc<dyn JsonFetcher>,
}

impl CachedFetcher {
    // == Constructors ==
    /// Creates an orchestrator that caches into `cache`.
    pub fn new(fetcher: Arc<dyn JsonFetcher>, cache: CacheStore) -> Self {
        Self {
            cache: Some(RwLock::new(cache)),
            fetcher,
        }
    }

    /// Creates an orchestrator that always goes to upstream.
    pub fn uncached(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            cache: None,
            fetcher,
        }
    }

    /// Builds the HTTP-backed orchestrator described by `config`. No store is
    /// allocated when caching is disabled.
    pub fn from_config(config: &Config) -> Self {
        let fetcher: Arc<dyn JsonFetcher> = Arc::new(HttpFetcher::new());
        if config.cache_enabled {
            Self::new(fetcher, CacheStore::new(config.cache_max, config.cache_ttl_ms))
        } else {
            Self::uncached(fetcher)
        }
    }

    // == Cached Fetch ==
    /// Returns the upstream JSON for `url`, from cache when a live entry exists.
    ///
    /// On a miss the fetched body is stored before being returned. Failures
    /// are passed through untouched and never cached.
    pub async fn cached_fetch(&self, url: &str) -> Result<Arc<Value>, UpstreamError> {
        let Some(cache) = &self.cache else {
            return self.fetch(url).await.map(Arc::new);
        };

        let hit = cache.write().await.get(url);
        if let Some(value) = hit {
            debug!(url, "served from cache");
            return Ok(value);
        }

        let value = Arc::new(self.fetch(url).await?);
        cache.write().await.set(url.to_string(), Arc::clone(&value));
        debug!(url, "cached upstream response");
        Ok(value)
    }

    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
        self.fetcher.fetch_json(url).await.inspect_err(|e| {
            warn!(url, error = %e, "upstream request failed");
        })
    }

    // == Inspection ==
    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns store statistics, or `None` when caching is disabled.
    pub async fn stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.read().await.stats()),
            None => None,
        }
    }

    /// Returns `(stats, capacity, ttl_ms)` read under one lock, if a store exists.
    pub async fn snapshot(&self) -> Option<(CacheStats, usize, u64)> {
        match &self.cache {
            Some(cache) => {
                let store = cache.read().await;
                Some((store.stats(), store.capacity(), store.ttl_ms()))
            }
            None => None,
        }
    }

    /// Returns whether `url` currently has a resident entry.
    pub async fn is_cached(&self, url: &str) -> bool {
        match &self.cache {
            Some(cache) => cache.read().await.contains_key(url),
            None => false,
        }
    }
}

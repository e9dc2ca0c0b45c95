//! Moka-backed airport code cache
//!
//! Keeps city-to-IATA resolutions in memory for the configured TTL so that
//! repeated searches for the same city skip the locations API.

use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::{AirportCodeCache, CacheStats, cache_key};
use async_trait::async_trait;
use domain::IataCode;
use moka::future::Cache;
use tracing::{debug, instrument};

use crate::config::CacheConfig;

/// In-memory airport code cache with TTL and size bound
pub struct MokaAirportCodeCache {
    cache: Cache<String, IataCode>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaAirportCodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaAirportCodeCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaAirportCodeCache {
    /// Create a cache from configuration
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl())
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl Default for MokaAirportCodeCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[async_trait]
impl AirportCodeCache for MokaAirportCodeCache {
    #[instrument(skip(self))]
    async fn get(&self, city: &str) -> Option<IataCode> {
        let code = self.cache.get(&cache_key(city)).await;
        if code.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Airport cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Airport cache miss");
        }
        code
    }

    #[instrument(skip(self))]
    async fn insert(&self, city: &str, code: IataCode) {
        self.cache.insert(cache_key(city), code).await;
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> IataCode {
        IataCode::new(s).unwrap()
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = MokaAirportCodeCache::default();

        assert!(cache.get("London").await.is_none());
        cache.insert("London", code("LON")).await;
        assert_eq!(cache.get("London").await, Some(code("LON")));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn keys_ignore_case_and_spacing() {
        let cache = MokaAirportCodeCache::default();
        cache.insert("New York", code("NYC")).await;

        assert_eq!(cache.get("  new   york ").await, Some(code("NYC")));
        assert_eq!(cache.get("NEW YORK").await, Some(code("NYC")));
    }

    #[tokio::test]
    async fn insert_replaces_existing_code() {
        let cache = MokaAirportCodeCache::default();
        cache.insert("Paris", code("CDG")).await;
        cache.insert("paris", code("PAR")).await;

        assert_eq!(cache.get("Paris").await, Some(code("PAR")));
    }

    #[tokio::test]
    async fn entry_count_reflects_inserts() {
        let cache = MokaAirportCodeCache::default();
        cache.insert("Delhi", code("DEL")).await;
        cache.insert("Mumbai", code("BOM")).await;
        cache.cache.run_pending_tasks().await;

        assert_eq!(cache.stats().entries, 2);
    }

    #[test]
    fn debug_shows_counters() {
        let cache = MokaAirportCodeCache::default();
        let debug = format!("{cache:?}");
        assert!(debug.contains("MokaAirportCodeCache"));
        assert!(debug.contains("hits"));
    }
}

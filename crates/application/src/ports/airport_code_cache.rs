//! Airport code cache port
//!
//! City name to IATA code memo, injected into the airport resolver.
//! Implementations must be safe to share between concurrent searches.

use async_trait::async_trait;
use domain::IataCode;
#[cfg(test)]
use mockall::automock;

/// Cache of resolved airport codes keyed by city name
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirportCodeCache: Send + Sync + std::fmt::Debug {
    /// Get the cached code for a city, `None` on miss
    async fn get(&self, city: &str) -> Option<IataCode>;

    /// Store the code for a city
    async fn insert(&self, city: &str, code: IataCode);

    /// Get cache statistics (hits, misses, size)
    fn stats(&self) -> CacheStats;
}

/// Normalized cache key for a city name
///
/// "  London " and "london" share an entry.
#[must_use]
pub fn cache_key(city: &str) -> String {
    city.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

//! Airport code cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the in-memory airport code cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a resolved code stays valid, in hours (default: 24)
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    /// Maximum number of cities kept (default: 1000)
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_ttl_hours() -> u64 {
    24
}

const fn default_max_entries() -> u64 {
    1_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Entry time-to-live
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours * 60 * 60)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_hours == 0 {
            return Err("cache.ttl_hours must be greater than 0".to_string());
        }
        if self.max_entries == 0 {
            return Err("cache.max_entries must be greater than 0".to_string());
        }
        Ok(())
    }
}

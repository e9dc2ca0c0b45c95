//! City name to IATA code resolution with a memo cache

use std::sync::Arc;

use domain::IataCode;
use tracing::{debug, instrument, warn};

use crate::ports::{AirportCodeCache, AirportLookupPort};

/// Resolves city names to IATA codes, consulting the cache first
pub struct AirportResolver {
    lookup: Arc<dyn AirportLookupPort>,
    cache: Arc<dyn AirportCodeCache>,
}

impl std::fmt::Debug for AirportResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirportResolver")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl AirportResolver {
    /// Create a resolver over a lookup port and a shared cache
    pub fn new(lookup: Arc<dyn AirportLookupPort>, cache: Arc<dyn AirportCodeCache>) -> Self {
        Self { lookup, cache }
    }

    /// Resolve `city` to the best matching IATA code
    ///
    /// Lookup failures and empty results both yield `None`; only successful
    /// resolutions are cached.
    #[instrument(skip(self))]
    pub async fn resolve(&self, city: &str) -> Option<IataCode> {
        if let Some(code) = self.cache.get(city).await {
            debug!(code = %code, "Airport code cache hit");
            return Some(code);
        }

        let locations = match self.lookup.find_locations(city).await {
            Ok(locations) => locations,
            Err(e) => {
                warn!(error = %e, "Airport lookup failed");
                return None;
            },
        };

        let code = locations.into_iter().next()?.iata_code;
        self.cache.insert(city, code.clone()).await;
        debug!(code = %code, "Airport code resolved");
        Some(code)
    }
}

//! Port definitions - Interfaces for external systems
//!
//! Ports are implemented by adapters in the infrastructure layer.

mod airport_code_cache;
mod airport_lookup_port;
mod flight_search_port;
mod inference_port;

pub use airport_code_cache::{AirportCodeCache, CacheStats, cache_key};
pub use airport_lookup_port::{AirportLocation, AirportLookupPort, LocationKind};
pub use flight_search_port::{
    DEFAULT_CURRENCY, DEFAULT_MAX_RESULTS, FlightSearchPort, FlightSearchQuery,
};
pub use inference_port::{InferencePort, InferenceResult};

#[cfg(test)]
pub use airport_code_cache::MockAirportCodeCache;
#[cfg(test)]
pub use airport_lookup_port::MockAirportLookupPort;
#[cfg(test)]
pub use flight_search_port::MockFlightSearchPort;
#[cfg(test)]
pub use inference_port::MockInferencePort;

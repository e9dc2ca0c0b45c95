//! Cache implementations

mod moka_airport_cache;

pub use moka_airport_cache::MokaAirportCodeCache;

//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports against the OpenAI chat completions API,
//! the Amadeus APIs and an in-memory airport code cache, and owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use cache::MokaAirportCodeCache;
pub use config::{AppConfig, CacheConfig, ENV_PREFIX};
pub use retry::{RetryConfig, retry};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};

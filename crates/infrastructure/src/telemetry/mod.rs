//! Logging initialization
//!
//! Structured `tracing` output to stderr, as text or JSON.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, build_filter, init_logging};

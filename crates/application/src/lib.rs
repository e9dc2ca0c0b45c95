//! Application layer - Use cases and orchestration
//!
//! Contains the date normalizer, the port definitions for the language model,
//! airport lookup and flight search collaborators, and the services that
//! orchestrate a flight search from free text to a result table.

pub mod date_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use date_parser::{DateNormalizer, normalize_date, normalize_json_date};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

//! Amadeus integration for the flight agent
//!
//! Provides city/airport code lookup and flight offer search via the
//! [Amadeus Self-Service](https://developers.amadeus.com) REST APIs.
//!
//! # Architecture
//!
//! [`AmadeusClient`] defines the two calls the agent needs and is implemented
//! by [`HttpAmadeusClient`]. Requests carry a pre-issued bearer token from
//! [`AmadeusConfig`]; obtaining that token is left to the deployment.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_amadeus::{AmadeusClient, AmadeusConfig, HttpAmadeusClient};
//!
//! let client = HttpAmadeusClient::new(&AmadeusConfig::default())?;
//! let locations = client.search_locations("London").await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{AmadeusClient, HttpAmadeusClient};
pub use config::AmadeusConfig;
pub use error::AmadeusError;
pub use models::{FlightOfferParams, FlightOfferSummary, Location, LocationSubType};

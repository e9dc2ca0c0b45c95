//! Flight search port
//!
//! Defines the interface for flight offer search. Adapters in the
//! infrastructure layer implement this port against a flight API.

use async_trait::async_trait;
use domain::{FlightOffer, IataCode, IsoDate, Passengers};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Currency used when none is configured
pub const DEFAULT_CURRENCY: &str = "GBP";

/// Number of offers requested when none is configured
pub const DEFAULT_MAX_RESULTS: u8 = 10;

/// Parameters of a flight offer search
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSearchQuery {
    /// Origin city or airport code
    pub origin: IataCode,
    /// Destination city or airport code
    pub destination: IataCode,
    /// Outbound date
    pub departure: IsoDate,
    /// Inbound date, `None` for one-way
    pub return_date: Option<IsoDate>,
    /// Travellers
    pub passengers: Passengers,
    /// Only non-stop flights
    pub non_stop: bool,
    /// ISO-4217 currency for prices
    pub currency: String,
    /// Maximum number of offers to return
    pub max_results: u8,
}

impl FlightSearchQuery {
    /// Create a one-way query with default currency and result limit
    #[must_use]
    pub fn new(
        origin: IataCode,
        destination: IataCode,
        departure: IsoDate,
        passengers: Passengers,
    ) -> Self {
        Self {
            origin,
            destination,
            departure,
            return_date: None,
            passengers,
            non_stop: false,
            currency: DEFAULT_CURRENCY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the return date
    #[must_use]
    pub const fn with_return(mut self, return_date: Option<IsoDate>) -> Self {
        self.return_date = return_date;
        self
    }

    /// Restrict to non-stop flights
    #[must_use]
    pub const fn with_non_stop(mut self, non_stop: bool) -> Self {
        self.non_stop = non_stop;
        self
    }

    /// Set the price currency
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the maximum number of offers
    #[must_use]
    pub const fn with_max_results(mut self, max: u8) -> Self {
        self.max_results = max;
        self
    }
}

/// Port for flight offer search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FlightSearchPort: Send + Sync {
    /// Search for offers matching the query, in provider order
    async fn search_offers(
        &self,
        query: &FlightSearchQuery,
    ) -> Result<Vec<FlightOffer>, ApplicationError>;
}

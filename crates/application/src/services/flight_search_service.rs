//! Flight search use case
//!
//! Free text goes in, one of four conversational outcomes comes out:
//!
//! 1. the language model extracts a [`TravelRequest`]
//! 2. missing or unreadable fields turn into clarifying questions
//! 3. both cities are resolved to IATA codes
//! 4. offers are fetched and arranged into a results table

use std::sync::Arc;

use chrono::NaiveDate;
use domain::TravelRequest;
use tracing::{info, instrument};

use super::airport_resolver::AirportResolver;
use super::clarification::{MissingField, RequestCheck, check_request};
use super::request_extractor::TravelRequestExtractor;
use super::search_report::{FlightResultsTable, SearchSummary};
use crate::date_parser::DateNormalizer;
use crate::error::ApplicationError;
use crate::ports::{DEFAULT_CURRENCY, DEFAULT_MAX_RESULTS, FlightSearchPort, FlightSearchQuery};

/// Search parameters that do not come from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// ISO-4217 currency for prices
    pub currency: String,
    /// Maximum number of offers to request
    pub max_results: u8,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Result of a search attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The user has to answer these first
    NeedsClarification {
        /// Missing fields in asking order
        missing: Vec<MissingField>,
    },
    /// At least one city could not be mapped to an airport code
    UnknownAirports {
        /// The search that was attempted
        summary: SearchSummary,
        /// City names without a code
        unresolved: Vec<String>,
    },
    /// The provider returned no offers
    NoFlights {
        /// The search that was attempted
        summary: SearchSummary,
    },
    /// Offers found
    Results {
        /// The search that was run
        summary: SearchSummary,
        /// Offers in display order
        table: FlightResultsTable,
    },
}

impl SearchOutcome {
    /// Text to show the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NeedsClarification { missing } => missing
                .iter()
                .map(MissingField::question)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::UnknownAirports { unresolved, .. } => format!(
                "Could not find an airport for: {}. Please check the city names.",
                unresolved.join(", ")
            ),
            Self::NoFlights { summary } => {
                format!("{summary}\n\nNo flights found for this search.")
            },
            Self::Results { summary, table } => {
                format!("{summary}\n\n{}", table.render_markdown())
            },
        }
    }
}

/// Orchestrates extraction, clarification, airport resolution and search
pub struct FlightSearchService {
    extractor: TravelRequestExtractor,
    resolver: AirportResolver,
    flights: Arc<dyn FlightSearchPort>,
    settings: SearchSettings,
}

impl std::fmt::Debug for FlightSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightSearchService")
            .field("extractor", &self.extractor)
            .field("resolver", &self.resolver)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl FlightSearchService {
    /// Create the service from its collaborators
    pub fn new(
        extractor: TravelRequestExtractor,
        resolver: AirportResolver,
        flights: Arc<dyn FlightSearchPort>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            extractor,
            resolver,
            flights,
            settings,
        }
    }

    /// Run a search from free text, resolving relative dates against `today`
    #[instrument(skip(self, text), fields(text_len = text.len(), %today))]
    pub async fn search(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<SearchOutcome, ApplicationError> {
        let request = self.extractor.extract(text).await?;
        self.search_request(&request, today).await
    }

    /// Run a search for an already extracted request
    pub async fn search_request(
        &self,
        request: &TravelRequest,
        today: NaiveDate,
    ) -> Result<SearchOutcome, ApplicationError> {
        let complete = match check_request(request, &DateNormalizer::new(today))? {
            RequestCheck::Complete(complete) => complete,
            RequestCheck::Incomplete(missing) => {
                return Ok(SearchOutcome::NeedsClarification { missing });
            },
        };

        let origin = self.resolver.resolve(&complete.origin).await;
        let destination = self.resolver.resolve(&complete.destination).await;

        let (Some(origin), Some(destination)) = (origin.clone(), destination.clone()) else {
            let mut unresolved = Vec::new();
            if origin.is_none() {
                unresolved.push(complete.origin.clone());
            }
            if destination.is_none() {
                unresolved.push(complete.destination.clone());
            }
            info!(unresolved = ?unresolved, "Airport codes not found");
            return Ok(SearchOutcome::UnknownAirports {
                summary: SearchSummary::new(complete),
                unresolved,
            });
        };

        let query = FlightSearchQuery::new(
            origin,
            destination,
            complete.departure,
            complete.passengers.clone(),
        )
        .with_return(complete.return_date)
        .with_non_stop(complete.direct_flight)
        .with_currency(self.settings.currency.clone())
        .with_max_results(self.settings.max_results);

        let offers = self.flights.search_offers(&query).await?;
        info!(
            origin = %query.origin,
            destination = %query.destination,
            offers = offers.len(),
            "Flight search completed"
        );

        let summary = SearchSummary::new(complete);
        if offers.is_empty() {
            return Ok(SearchOutcome::NoFlights { summary });
        }

        Ok(SearchOutcome::Results {
            summary,
            table: FlightResultsTable::new(offers, self.settings.currency.clone()),
        })
    }
}

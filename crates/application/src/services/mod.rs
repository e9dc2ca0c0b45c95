//! Application services - Use case implementations

mod airport_resolver;
mod clarification;
mod flight_search_service;
mod request_extractor;
mod search_report;

pub use airport_resolver::AirportResolver;
pub use clarification::{CompleteRequest, MissingField, RequestCheck, check_request};
pub use flight_search_service::{FlightSearchService, SearchOutcome, SearchSettings};
pub use request_extractor::{EXTRACTION_SYSTEM_PROMPT, TravelRequestExtractor};
pub use search_report::{FlightResultsTable, SearchSummary};

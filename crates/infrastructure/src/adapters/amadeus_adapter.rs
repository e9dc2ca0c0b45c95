//! Amadeus adapter - Implements AirportLookupPort and FlightSearchPort
//!
//! Wraps the Amadeus HTTP client and converts between its wire models and
//! the domain types used by the application layer.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{AirportLocation, AirportLookupPort, FlightSearchPort, FlightSearchQuery, LocationKind},
};
use async_trait::async_trait;
use domain::{FlightOffer, IataCode};
use integration_amadeus::{
    AmadeusClient, AmadeusConfig, AmadeusError, FlightOfferParams, FlightOfferSummary,
    HttpAmadeusClient, Location, LocationSubType,
};
use tracing::{debug, instrument, warn};

use crate::retry::{RetryConfig, retry};

/// Adapter exposing Amadeus locations and flight offers as application ports
pub struct AmadeusAdapter {
    client: Arc<dyn AmadeusClient>,
    retry: RetryConfig,
}

impl std::fmt::Debug for AmadeusAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusAdapter")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl AmadeusAdapter {
    /// Create an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AmadeusConfig) -> Result<Self, ApplicationError> {
        let client = HttpAmadeusClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around any Amadeus client
    #[must_use]
    pub fn with_client(client: Arc<dyn AmadeusClient>) -> Self {
        Self {
            client,
            retry: RetryConfig::default(),
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Convert Amadeus error to application error
    fn map_error(e: AmadeusError) -> ApplicationError {
        match e {
            AmadeusError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            AmadeusError::ConnectionFailed(_)
            | AmadeusError::ServiceUnavailable(_)
            | AmadeusError::Timeout { .. } => ApplicationError::ExternalService(e.to_string()),
            AmadeusError::Unauthorized(msg) => {
                ApplicationError::Configuration(format!("Amadeus access token rejected: {msg}"))
            },
            other => ApplicationError::Internal(format!("Amadeus: {other}")),
        }
    }

    fn convert_location(location: Location) -> Option<AirportLocation> {
        let kind = match location.sub_type {
            LocationSubType::City => LocationKind::City,
            LocationSubType::Airport => LocationKind::Airport,
            LocationSubType::Other => return None,
        };
        match IataCode::new(location.iata_code.as_str()) {
            Ok(iata_code) => Some(AirportLocation {
                iata_code,
                name: location.name,
                kind,
            }),
            Err(e) => {
                warn!(code = %location.iata_code, error = %e, "Skipping location with invalid code");
                None
            },
        }
    }

    fn convert_offer(summary: FlightOfferSummary) -> FlightOffer {
        FlightOffer {
            airline: summary.airline,
            stops: summary.stops,
            duration: summary.duration,
            price: summary.total_price,
            currency: summary.currency,
        }
    }

    fn to_params(query: &FlightSearchQuery) -> FlightOfferParams {
        FlightOfferParams {
            origin: query.origin.to_string(),
            destination: query.destination.to_string(),
            departure_date: query.departure.to_string(),
            return_date: query.return_date.as_ref().map(ToString::to_string),
            adults: query.passengers.adults(),
            children: query.passengers.children(),
            infants: query.passengers.infants(),
            non_stop: query.non_stop,
            currency: query.currency.clone(),
            max: query.max_results,
        }
    }
}

#[async_trait]
impl AirportLookupPort for AmadeusAdapter {
    #[instrument(skip(self))]
    async fn find_locations(
        &self,
        keyword: &str,
    ) -> Result<Vec<AirportLocation>, ApplicationError> {
        let client = &self.client;
        let locations = retry(&self.retry, "location search", move || async move {
            client.search_locations(keyword).await.map_err(Self::map_error)
        })
        .await?;

        let found: Vec<AirportLocation> = locations
            .into_iter()
            .filter_map(Self::convert_location)
            .collect();
        debug!(count = found.len(), "Locations resolved");
        Ok(found)
    }
}

#[async_trait]
impl FlightSearchPort for AmadeusAdapter {
    #[instrument(skip(self, query), fields(origin = %query.origin, destination = %query.destination))]
    async fn search_offers(
        &self,
        query: &FlightSearchQuery,
    ) -> Result<Vec<FlightOffer>, ApplicationError> {
        let params = Self::to_params(query);
        let client = &self.client;
        let params_ref = &params;
        let summaries = retry(&self.retry, "flight offer search", move || async move {
            client
                .search_flight_offers(params_ref)
                .await
                .map_err(Self::map_error)
        })
        .await?;

        Ok(summaries.into_iter().map(Self::convert_offer).collect())
    }
}

#[cfg(test)]
mod tests {
    use domain::{IsoDate, Passengers};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    mockall::mock! {
        Client {}

        #[async_trait]
        impl AmadeusClient for Client {
            async fn search_locations(&self, keyword: &str) -> Result<Vec<Location>, AmadeusError>;
            async fn search_flight_offers(
                &self,
                params: &FlightOfferParams,
            ) -> Result<Vec<FlightOfferSummary>, AmadeusError>;
        }
    }

    fn adapter_for(server: &MockServer) -> AmadeusAdapter {
        AmadeusAdapter::new(&AmadeusConfig::for_testing(server.uri()))
            .unwrap()
            .with_retry(RetryConfig {
                initial_delay_ms: 0,
                max_delay_ms: 0,
                multiplier: 1.0,
                max_retries: 1,
                jitter: 0.0,
            })
    }

    fn query() -> FlightSearchQuery {
        FlightSearchQuery::new(
            IataCode::new("LON").unwrap(),
            IataCode::new("DEL").unwrap(),
            IsoDate::from_ymd(2025, 5, 5).unwrap(),
            Passengers::new(2, vec![7], 1).unwrap(),
        )
        .with_return(Some(IsoDate::from_ymd(2025, 5, 19).unwrap()))
        .with_non_stop(true)
    }

    #[test]
    fn params_carry_every_query_field() {
        let params = AmadeusAdapter::to_params(&query());
        assert_eq!(params.origin, "LON");
        assert_eq!(params.destination, "DEL");
        assert_eq!(params.departure_date, "2025-05-05");
        assert_eq!(params.return_date.as_deref(), Some("2025-05-19"));
        assert_eq!(params.adults, 2);
        assert_eq!(params.children, 1);
        assert_eq!(params.infants, 1);
        assert!(params.non_stop);
        assert_eq!(params.currency, "GBP");
        assert_eq!(params.max, 10);
    }

    #[test]
    fn map_error_classifies_failures() {
        assert!(AmadeusAdapter::map_error(AmadeusError::ServiceUnavailable("x".into())).is_retryable());
        assert!(
            AmadeusAdapter::map_error(AmadeusError::RateLimitExceeded {
                retry_after_secs: None
            })
            .is_retryable()
        );
        assert!(matches!(
            AmadeusAdapter::map_error(AmadeusError::Unauthorized("expired".into())),
            ApplicationError::Configuration(_)
        ));
        assert!(!AmadeusAdapter::map_error(AmadeusError::InvalidRequest("date".into())).is_retryable());
    }

    #[test]
    fn convert_location_skips_other_kinds_and_bad_codes() {
        let poi = Location {
            iata_code: "XYZ".to_string(),
            name: "Somewhere".to_string(),
            sub_type: LocationSubType::Other,
        };
        assert!(AmadeusAdapter::convert_location(poi).is_none());

        let bad = Location {
            iata_code: "L1".to_string(),
            name: "Broken".to_string(),
            sub_type: LocationSubType::City,
        };
        assert!(AmadeusAdapter::convert_location(bad).is_none());
    }

    #[tokio::test]
    async fn find_locations_converts_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/reference-data/locations"))
            .and(query_param("keyword", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":[
                    {"subType":"CITY","name":"LONDON","iataCode":"LON"},
                    {"subType":"AIRPORT","name":"HEATHROW","iataCode":"LHR"}
                ]}"#,
            ))
            .mount(&server)
            .await;

        let locations = adapter_for(&server).find_locations("London").await.unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].iata_code.as_str(), "LON");
        assert_eq!(locations[0].kind, LocationKind::City);
        assert_eq!(locations[1].kind, LocationKind::Airport);
    }

    #[tokio::test]
    async fn search_offers_retries_outage_then_converts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/shopping/flight-offers"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/shopping/flight-offers"))
            .and(query_param("returnDate", "2025-05-19"))
            .and(query_param("infants", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":[{
                    "validatingAirlineCodes":["AI"],
                    "itineraries":[{"duration":"PT9H35M","segments":[{"carrierCode":"AI"}]}],
                    "price":{"currency":"GBP","total":"512.00"}
                }]}"#,
            ))
            .mount(&server)
            .await;

        let offers = adapter_for(&server).search_offers(&query()).await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].airline, "AI");
        assert_eq!(offers[0].stops, 0);
        assert_eq!(offers[0].format_price(), "£512.00");
    }

    #[tokio::test]
    async fn bad_request_surfaces_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/shopping/flight-offers"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"errors":[{"title":"INVALID DATE","detail":"Date/Time is in the past"}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let err = adapter_for(&server).search_offers(&query()).await.unwrap_err();
        assert!(err.to_string().contains("Date/Time is in the past"));
    }

    #[tokio::test]
    async fn rate_limit_is_retried_up_to_policy() {
        let mut client = MockClient::new();
        client
            .expect_search_locations()
            .times(2)
            .returning(|_| Err(AmadeusError::RateLimitExceeded { retry_after_secs: Some(1) }));

        let adapter = AmadeusAdapter::with_client(Arc::new(client)).with_retry(RetryConfig {
            initial_delay_ms: 0,
            max_delay_ms: 0,
            multiplier: 1.0,
            max_retries: 1,
            jitter: 0.0,
        });

        let err = adapter.find_locations("Paris").await.unwrap_err();
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[tokio::test]
    async fn locations_pass_keyword_through() {
        let mut client = MockClient::new();
        client
            .expect_search_locations()
            .withf(|keyword| str::eq(keyword, "New York"))
            .times(1)
            .returning(|_| {
                Ok(vec![Location {
                    iata_code: "NYC".to_string(),
                    name: "NEW YORK".to_string(),
                    sub_type: LocationSubType::City,
                }])
            });

        let adapter = AmadeusAdapter::with_client(Arc::new(client));
        let found = adapter.find_locations("New York").await.unwrap();
        assert_eq!(found[0].iata_code.as_str(), "NYC");
    }
}

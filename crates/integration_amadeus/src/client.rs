//! Amadeus REST client
//!
//! Calls the reference-data locations API and the flight offers search API
//! with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::AmadeusConfig;
use crate::error::AmadeusError;
use crate::models::{
    FlightOfferParams, FlightOfferSummary, Location, RawDataResponse, RawErrorResponse,
    RawFlightOffer, RawLocation,
};

/// Trait for Amadeus API clients
#[async_trait]
pub trait AmadeusClient: Send + Sync {
    /// Find cities and airports matching a keyword, best match first
    async fn search_locations(&self, keyword: &str) -> Result<Vec<Location>, AmadeusError>;

    /// Search flight offers
    async fn search_flight_offers(
        &self,
        params: &FlightOfferParams,
    ) -> Result<Vec<FlightOfferSummary>, AmadeusError>;
}

/// Amadeus client over HTTP
#[derive(Debug)]
pub struct HttpAmadeusClient {
    client: Client,
    config: AmadeusConfig,
}

impl HttpAmadeusClient {
    /// Create a new Amadeus client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &AmadeusConfig) -> Result<Self, AmadeusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("flight-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AmadeusError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue an authorized GET and decode the `data` envelope
    async fn get_data<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, AmadeusError> {
        let token = self
            .config
            .access_token
            .as_ref()
            .ok_or_else(|| AmadeusError::Unauthorized("no access token configured".to_string()))?;

        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token.expose_secret())
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AmadeusError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    AmadeusError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AmadeusError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AmadeusError::ParseError(e.to_string()))?;

        if !status.is_success() {
            let detail = Self::error_detail(&body).unwrap_or_else(|| format!("HTTP {status}"));
            warn!(%status, %detail, "Amadeus request failed");
            return Err(match status {
                StatusCode::BAD_REQUEST => AmadeusError::InvalidRequest(detail),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    AmadeusError::Unauthorized(detail)
                },
                s if s.is_server_error() => AmadeusError::ServiceUnavailable(detail),
                _ => AmadeusError::RequestFailed(detail),
            });
        }

        let raw: RawDataResponse<T> =
            serde_json::from_str(&body).map_err(|e| AmadeusError::ParseError(e.to_string()))?;
        Ok(raw.data)
    }

    /// First error title/detail from an Amadeus error body
    fn error_detail(body: &str) -> Option<String> {
        let raw: RawErrorResponse = serde_json::from_str(body).ok()?;
        let first = raw.errors.into_iter().next()?;
        match (first.title, first.detail) {
            (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
            (Some(text), None) | (None, Some(text)) => Some(text),
            (None, None) => None,
        }
    }

    fn convert_location(raw: RawLocation) -> Option<Location> {
        Some(Location {
            iata_code: raw.iata_code?,
            name: raw.name,
            sub_type: raw.sub_type,
        })
    }

    /// Reduce a raw offer to what the result table shows
    ///
    /// Offers without an itinerary or with an unreadable price are dropped.
    fn convert_offer(raw: RawFlightOffer) -> Option<FlightOfferSummary> {
        let Some(outbound) = raw.itineraries.into_iter().next() else {
            warn!("Skipping flight offer without itinerary");
            return None;
        };
        let Ok(total_price) = raw.price.total.parse::<f64>() else {
            warn!(total = %raw.price.total, "Skipping flight offer with unreadable price");
            return None;
        };

        let airline = raw
            .validating_airline_codes
            .into_iter()
            .next()
            .or_else(|| {
                outbound
                    .segments
                    .first()
                    .and_then(|s| s.carrier_code.clone())
            })
            .unwrap_or_default();
        let stops = u32::try_from(outbound.segments.len().saturating_sub(1)).unwrap_or(u32::MAX);

        Some(FlightOfferSummary {
            airline,
            stops,
            duration: outbound.duration,
            total_price,
            currency: raw.price.currency,
        })
    }
}

#[async_trait]
impl AmadeusClient for HttpAmadeusClient {
    #[instrument(skip(self))]
    async fn search_locations(&self, keyword: &str) -> Result<Vec<Location>, AmadeusError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AmadeusError::InvalidRequest(
                "Location keyword must not be empty".to_string(),
            ));
        }

        let params = [
            ("keyword", keyword.to_string()),
            ("subType", "CITY,AIRPORT".to_string()),
        ];

        let raw: Vec<RawLocation> = self
            .get_data("/v1/reference-data/locations", &params)
            .await?;
        let locations: Vec<Location> = raw.into_iter().filter_map(Self::convert_location).collect();

        debug!(count = locations.len(), "Locations found");
        Ok(locations)
    }

    #[instrument(skip(self, params), fields(origin = %params.origin, destination = %params.destination))]
    async fn search_flight_offers(
        &self,
        params: &FlightOfferParams,
    ) -> Result<Vec<FlightOfferSummary>, AmadeusError> {
        let raw: Vec<RawFlightOffer> = self
            .get_data("/v2/shopping/flight-offers", &params.to_query())
            .await?;
        let offers: Vec<FlightOfferSummary> =
            raw.into_iter().filter_map(Self::convert_offer).collect();

        debug!(count = offers.len(), "Flight offers found");
        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer_json(json: &str) -> RawFlightOffer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn convert_offer_counts_stops_from_segments() {
        let raw = offer_json(
            r#"{
                "validatingAirlineCodes": ["AI"],
                "itineraries": [{"duration": "PT12H5M", "segments": [{"carrierCode":"AI"},{"carrierCode":"AI"}]}],
                "price": {"currency": "GBP", "total": "431.20"}
            }"#,
        );
        let offer = HttpAmadeusClient::convert_offer(raw).unwrap();
        assert_eq!(offer.airline, "AI");
        assert_eq!(offer.stops, 1);
        assert_eq!(offer.duration, "PT12H5M");
        assert!((offer.total_price - 431.20).abs() < f64::EPSILON);
    }

    #[test]
    fn convert_offer_falls_back_to_carrier_code() {
        let raw = offer_json(
            r#"{
                "itineraries": [{"duration": "PT9H", "segments": [{"carrierCode":"BA"}]}],
                "price": {"currency": "GBP", "total": "500.00"}
            }"#,
        );
        let offer = HttpAmadeusClient::convert_offer(raw).unwrap();
        assert_eq!(offer.airline, "BA");
        assert_eq!(offer.stops, 0);
    }

    #[test]
    fn convert_offer_drops_unreadable_price() {
        let raw = offer_json(
            r#"{"itineraries": [{"duration": "PT9H", "segments": []}],
                "price": {"currency": "GBP", "total": "n/a"}}"#,
        );
        assert!(HttpAmadeusClient::convert_offer(raw).is_none());
    }

    #[test]
    fn convert_offer_drops_missing_itinerary() {
        let raw = offer_json(r#"{"price": {"currency": "GBP", "total": "10.00"}}"#);
        assert!(HttpAmadeusClient::convert_offer(raw).is_none());
    }

    #[test]
    fn error_detail_prefers_title_and_detail() {
        let body = r#"{"errors":[{"status":400,"code":477,"title":"INVALID FORMAT","detail":"departureDate"}]}"#;
        assert_eq!(
            HttpAmadeusClient::error_detail(body).as_deref(),
            Some("INVALID FORMAT: departureDate")
        );
        assert!(HttpAmadeusClient::error_detail("<html>").is_none());
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = HttpAmadeusClient::new(&AmadeusConfig::for_testing("http://host/")).unwrap();
        assert_eq!(client.url("/v2/shopping/flight-offers"), "http://host/v2/shopping/flight-offers");
    }
}

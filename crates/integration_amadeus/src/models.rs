//! Typed models for Amadeus requests and responses

use serde::{Deserialize, Serialize};

/// Kind of location returned by the locations API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationSubType {
    /// Metropolitan area (e.g. LON)
    City,
    /// Single airport (e.g. LHR)
    Airport,
    /// Anything else the API may add
    #[serde(other)]
    Other,
}

/// A city or airport matching a keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// IATA code
    pub iata_code: String,
    /// Display name (e.g. "LONDON")
    pub name: String,
    /// City or airport
    pub sub_type: LocationSubType,
}

/// Parameters for a flight offers search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightOfferParams {
    /// Origin IATA code
    pub origin: String,
    /// Destination IATA code
    pub destination: String,
    /// Departure date as `YYYY-MM-DD`
    pub departure_date: String,
    /// Return date as `YYYY-MM-DD`, `None` for one-way
    pub return_date: Option<String>,
    /// Adults (12+)
    pub adults: u32,
    /// Children (2-11)
    pub children: u32,
    /// Lap infants
    pub infants: u32,
    /// Only non-stop flights
    pub non_stop: bool,
    /// Price currency
    pub currency: String,
    /// Maximum number of offers
    pub max: u8,
}

impl FlightOfferParams {
    /// Query string pairs in the order the API documents them
    ///
    /// Optional parameters are omitted rather than sent empty.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("originLocationCode", self.origin.clone()),
            ("destinationLocationCode", self.destination.clone()),
            ("departureDate", self.departure_date.clone()),
        ];
        if let Some(return_date) = &self.return_date {
            params.push(("returnDate", return_date.clone()));
        }
        params.push(("adults", self.adults.to_string()));
        if self.children > 0 {
            params.push(("children", self.children.to_string()));
        }
        if self.infants > 0 {
            params.push(("infants", self.infants.to_string()));
        }
        params.push(("nonStop", self.non_stop.to_string()));
        params.push(("currencyCode", self.currency.clone()));
        params.push(("max", self.max.to_string()));
        params
    }
}

/// The parts of a flight offer shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOfferSummary {
    /// Validating airline carrier code
    pub airline: String,
    /// Stops on the outbound itinerary
    pub stops: u32,
    /// Outbound ISO-8601 duration (e.g. "PT9H35M")
    pub duration: String,
    /// Total price for all travellers
    pub total_price: f64,
    /// Price currency
    pub currency: String,
}

// Raw API shapes

#[derive(Debug, Deserialize)]
pub(crate) struct RawDataResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLocation {
    pub iata_code: Option<String>,
    #[serde(default)]
    pub name: String,
    pub sub_type: LocationSubType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFlightOffer {
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    #[serde(default)]
    pub itineraries: Vec<RawItinerary>,
    pub price: RawPrice,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawItinerary {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSegment {
    pub carrier_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPrice {
    pub currency: String,
    pub total: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorResponse {
    #[serde(default)]
    pub errors: Vec<RawApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawApiError {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FlightOfferParams {
        FlightOfferParams {
            origin: "LON".to_string(),
            destination: "DEL".to_string(),
            departure_date: "2025-05-05".to_string(),
            return_date: None,
            adults: 2,
            children: 0,
            infants: 0,
            non_stop: true,
            currency: "GBP".to_string(),
            max: 10,
        }
    }

    #[test]
    fn one_way_query_omits_optional_params() {
        let query = params().to_query();
        let keys: Vec<_> = query.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "originLocationCode",
                "destinationLocationCode",
                "departureDate",
                "adults",
                "nonStop",
                "currencyCode",
                "max"
            ]
        );
        assert!(query.contains(&("nonStop", "true".to_string())));
    }

    #[test]
    fn round_trip_family_query() {
        let query = FlightOfferParams {
            return_date: Some("2025-05-19".to_string()),
            children: 2,
            infants: 1,
            non_stop: false,
            ..params()
        }
        .to_query();
        assert!(query.contains(&("returnDate", "2025-05-19".to_string())));
        assert!(query.contains(&("children", "2".to_string())));
        assert!(query.contains(&("infants", "1".to_string())));
        assert!(query.contains(&("nonStop", "false".to_string())));
    }

    #[test]
    fn unknown_sub_type_is_other() {
        let raw: RawLocation =
            serde_json::from_str(r#"{"iataCode":"XYZ","name":"X","subType":"POINT_OF_INTEREST"}"#)
                .unwrap();
        assert_eq!(raw.sub_type, LocationSubType::Other);
    }
}

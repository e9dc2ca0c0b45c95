//! Airport lookup port
//!
//! Resolves free-form city or airport names to IATA location codes.

use async_trait::async_trait;
use domain::IataCode;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Whether a location is a whole city or a single airport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Metropolitan area code covering several airports (e.g. LON)
    City,
    /// A single airport (e.g. LHR)
    Airport,
}

/// A location matching a lookup keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportLocation {
    /// IATA code of the city or airport
    pub iata_code: IataCode,
    /// Display name as reported by the provider
    pub name: String,
    /// City or airport
    pub kind: LocationKind,
}

/// Port for city/airport code lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirportLookupPort: Send + Sync {
    /// Find locations matching `keyword`, best match first
    async fn find_locations(&self, keyword: &str)
    -> Result<Vec<AirportLocation>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn AirportLookupPort>();
    }

    #[test]
    fn location_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&LocationKind::City).unwrap(), "\"city\"");
        assert_eq!(serde_json::to_string(&LocationKind::Airport).unwrap(), "\"airport\"");
    }
}

//! Builds the search service from configuration

use std::sync::Arc;

use application::{AirportResolver, FlightSearchService, TravelRequestExtractor};
use infrastructure::{AmadeusAdapter, AppConfig, MokaAirportCodeCache, OpenAiInferenceAdapter};
use tracing::{debug, warn};

/// Connect the OpenAI extractor, Amadeus adapter and airport cache
pub fn build_search_service(config: &AppConfig) -> anyhow::Result<FlightSearchService> {
    if config.inference.api_key.is_none() {
        warn!("No inference API key configured; set OPENAI_API_KEY");
    }
    if config.amadeus.access_token.is_none() {
        warn!("No Amadeus access token configured; set AMADEUS_ACCESS_TOKEN");
    }

    let inference =
        OpenAiInferenceAdapter::new(config.inference.clone())?.with_retry(config.retry.clone());
    let amadeus = Arc::new(AmadeusAdapter::new(&config.amadeus)?.with_retry(config.retry.clone()));
    let cache = Arc::new(MokaAirportCodeCache::new(&config.cache));

    debug!(
        model = %config.inference.default_model,
        amadeus = %config.amadeus.base_url,
        "Search service wired"
    );

    Ok(FlightSearchService::new(
        TravelRequestExtractor::new(Arc::new(inference)),
        AirportResolver::new(amadeus.clone(), cache),
        amadeus,
        config.search_settings(),
    ))
}

//! LLM-powered travel request extraction

use std::sync::Arc;

use domain::TravelRequest;
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::InferencePort};

/// System prompt instructing the model to answer with the request as JSON
pub const EXTRACTION_SYSTEM_PROMPT: &str = "Extract flight details from the user's input. \
Return output in valid JSON format with keys: origin, destination, departure_date, \
return_date (null if one-way), adults, children (list of ages), infants, \
direct_flight (true/false). Keep dates exactly as the user wrote them \
(e.g. \"tomorrow\", \"in 5 days\", \"May 5th\"). Use null for anything not mentioned.";

/// Turns free text into a [`TravelRequest`] using a language model
pub struct TravelRequestExtractor {
    inference: Arc<dyn InferencePort>,
}

impl std::fmt::Debug for TravelRequestExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelRequestExtractor")
            .field("model", &self.inference.current_model())
            .finish()
    }
}

impl TravelRequestExtractor {
    /// Create an extractor backed by the given inference port
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Ask the model to extract the structured request from `input`
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub async fn extract(&self, input: &str) -> Result<TravelRequest, ApplicationError> {
        let result = self
            .inference
            .generate_with_system(EXTRACTION_SYSTEM_PROMPT, input)
            .await?;

        debug!(
            model = %result.model,
            latency_ms = result.latency_ms,
            "Extraction response received"
        );

        Self::parse_response(&result.content)
    }

    /// Parse the model's answer into a travel request
    pub fn parse_response(response: &str) -> Result<TravelRequest, ApplicationError> {
        let json_str = Self::extract_json(response);

        TravelRequest::from_json(json_str).map_err(|e| {
            warn!(error = %e, response = %response, "Failed to parse extraction response");
            ApplicationError::InvalidResponse(format!("response is not valid request JSON: {e}"))
        })
    }

    /// Extract JSON from potentially markdown-wrapped response
    fn extract_json(response: &str) -> &str {
        let response = response.trim();

        if let Some((_, after)) = response.split_once("```json") {
            if let Some((body, _)) = after.split_once("```") {
                return body.trim();
            }
        }

        if let Some((_, after)) = response.split_once("```") {
            if let Some((body, _)) = after.split_once("```") {
                return body.trim();
            }
        }

        // Ensure start < end to avoid panics with malformed input like "} {"
        if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
            if start <= end {
                return &response[start..=end];
            }
        }

        response
    }
}

//! OpenAI inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenAiInferenceEngine};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::retry::{RetryConfig, retry};

/// Adapter for OpenAI-compatible chat completion servers
#[derive(Debug)]
pub struct OpenAiInferenceAdapter {
    engine: OpenAiInferenceEngine,
    retry: RetryConfig,
}

impl OpenAiInferenceAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiInferenceEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self {
            engine,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Inference server unreachable: {msg}"))
            },
            InferenceError::Timeout => {
                ApplicationError::ExternalService("Inference request timed out".to_string())
            },
            InferenceError::ServerError(msg) => ApplicationError::ExternalService(msg),
            InferenceError::Unauthorized(msg) => {
                ApplicationError::Configuration(format!("Inference API key rejected: {msg}"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for OpenAiInferenceAdapter {
    #[instrument(skip(self, system_prompt, message), fields(message_len = message.len()))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let response = retry(&self.retry, "chat completion", move || async move {
            self.engine
                .generate(InferenceRequest::with_system(system_prompt, message))
                .await
                .map_err(Self::map_error)
        })
        .await?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let tokens_used = response.usage.map(|u| u.total_tokens);

        debug!(
            model = %response.model,
            tokens = ?tokens_used,
            latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used,
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Inference health check failed");
                false
            },
        }
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}

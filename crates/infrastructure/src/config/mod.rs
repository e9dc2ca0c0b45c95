//! Application configuration
//!
//! Loaded in layers, later ones winning:
//! - built-in defaults
//! - `config.toml` in the working directory, or an explicit file
//! - `FLIGHT_AGENT_*` environment variables, with `__` between section and key
//!   (e.g. `FLIGHT_AGENT_AMADEUS__ACCESS_TOKEN`)
//! - `OPENAI_API_KEY` / `AMADEUS_ACCESS_TOKEN` for credentials still unset

mod cache;

use std::path::Path;

use ai_core::InferenceConfig;
use application::SearchSettings;
use integration_amadeus::AmadeusConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use cache::CacheConfig;

use crate::retry::RetryConfig;
use crate::telemetry::LoggingConfig;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "FLIGHT_AGENT";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language model used to extract travel requests
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Amadeus location and flight offer APIs
    #[serde(default)]
    pub amadeus: AmadeusConfig,

    /// Airport code cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Retry policy for external calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment
    ///
    /// With `path` set the file must exist; otherwise `config.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.fill_credentials_from(|name| std::env::var(name).ok());

        debug!(
            has_inference_key = config.inference.api_key.is_some(),
            has_amadeus_token = config.amadeus.access_token.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Fill unset credentials from their conventional variables
    ///
    /// Values already set by the file or `FLIGHT_AGENT_*` variables are kept.
    pub fn fill_credentials_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.inference.api_key.is_none() {
            self.inference.api_key = lookup("OPENAI_API_KEY")
                .filter(|v| !v.is_empty())
                .map(SecretString::from);
        }
        if self.amadeus.access_token.is_none() {
            self.amadeus.access_token = lookup("AMADEUS_ACCESS_TOKEN")
                .filter(|v| !v.is_empty())
                .map(SecretString::from);
        }
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.inference.validate()?;
        self.amadeus.validate()?;
        self.cache.validate()?;
        self.retry.validate()?;
        Ok(())
    }

    /// Search parameters taken from the Amadeus section
    #[must_use]
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            currency: self.amadeus.currency.to_uppercase(),
            max_results: self.amadeus.max_results,
        }
    }
}

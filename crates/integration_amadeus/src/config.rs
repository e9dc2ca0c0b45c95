//! Amadeus service configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for the Amadeus Self-Service APIs
#[derive(Clone, Serialize, Deserialize)]
pub struct AmadeusConfig {
    /// Base URL of the API (test or production environment)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Pre-issued OAuth access token (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// ISO-4217 currency for offer prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Maximum number of flight offers per search
    #[serde(default = "default_max_results")]
    pub max_results: u8,
}

impl std::fmt::Debug for AmadeusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("currency", &self.currency)
            .field("max_results", &self.max_results)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://test.api.amadeus.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

fn default_currency() -> String {
    "GBP".to_string()
}

const fn default_max_results() -> u8 {
    10
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            currency: default_currency(),
            max_results: default_max_results(),
        }
    }
}

impl AmadeusConfig {
    /// Create a configuration suitable for testing against a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: Some(SecretString::from("test-token")),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("amadeus.base_url '{}' is not a URL: {e}", self.base_url))?;

        if self.timeout_secs == 0 {
            return Err("amadeus.timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 || self.max_results > 250 {
            return Err("amadeus.max_results must be between 1 and 250".to_string());
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!(
                "amadeus.currency '{}' is not a three-letter code",
                self.currency
            ));
        }

        Ok(())
    }
}

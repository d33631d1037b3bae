//! Client configuration
//!
//! Configuration is an explicit struct handed to the client at construction
//! time; nothing is read from process-wide state after that. The test-mode
//! flag is derived once from the sentinel token and never changes for the
//! lifetime of a client.

use std::time::Duration;

use gpttrainer_domain::{Result, TrainerError};

/// Default base URL of the GPT Trainer API
pub const DEFAULT_BASE_URL: &str = "https://app.gpt-trainer.com/api/v1";

/// Sentinel token value that switches the client into test mode
pub const TEST_TOKEN: &str = "test_token";

/// Per-call HTTP timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Response cache time-to-live (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// MIME types accepted for file data sources unless the caller extends the
/// allow-list
const DEFAULT_ALLOWED_MIME_TYPES: [&str; 3] =
    ["text/plain", "application/pdf", "application/json"];

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "GPT_TRAINER_API_TOKEN";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV_VAR: &str = "GPT_TRAINER_BASE_URL";

/// Configuration for the GPT Trainer client
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Base URL for the API (e.g., `https://app.gpt-trainer.com/api/v1`)
    pub base_url: String,
    /// Bearer token; the literal `test_token` activates test mode
    pub api_token: String,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// Time-to-live for cached collection reads
    pub cache_ttl: Duration,
    /// MIME types accepted for file uploads
    pub allowed_mime_types: Vec<String>,
}

impl TrainerConfig {
    /// Create a configuration with defaults for everything but the token.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Config`] if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(TrainerError::Config(
                "API token is required but not configured".to_string(),
            ));
        }

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }

    /// Build a configuration from `GPT_TRAINER_API_TOKEN` and, when set,
    /// `GPT_TRAINER_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Config`] if the token variable is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR).map_err(|_| {
            TrainerError::Config(format!(
                "{TOKEN_ENV_VAR} environment variable is required but not set"
            ))
        })?;

        let mut config = Self::new(token)?;
        if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-call HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the response cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Extend the upload MIME allow-list.
    pub fn allow_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.allowed_mime_types.push(mime_type.into());
        self
    }

    /// True iff the configured token equals the sentinel test value.
    pub fn is_test_mode(&self) -> bool {
        self.api_token == TEST_TOKEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_a_fatal_config_error() {
        let result = TrainerConfig::new("   ");
        assert!(matches!(result, Err(TrainerError::Config(_))));
    }

    #[test]
    fn sentinel_token_activates_test_mode() {
        let config = TrainerConfig::new(TEST_TOKEN).expect("valid config");
        assert!(config.is_test_mode());

        let config = TrainerConfig::new("sk-live-1234").expect("valid config");
        assert!(!config.is_test_mode());
    }

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = TrainerConfig::new("token").expect("valid config");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert!(config.allowed_mime_types.contains(&"application/pdf".to_string()));
    }

    #[test]
    fn allow_list_is_extensible() {
        let config = TrainerConfig::new("token")
            .expect("valid config")
            .allow_mime_type("text/csv");
        assert!(config.allowed_mime_types.contains(&"text/csv".to_string()));
    }
}

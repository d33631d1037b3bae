//! Client composition root
//!
//! [`GptTrainerClient`] owns the resolved configuration, the transport, the
//! response cache, and the error observer for its whole lifetime. The
//! operation families live in sibling modules (`data_sources`, `chatbots`,
//! `agents`, `tags`, `analysis`); this module provides construction and the
//! shared request/error plumbing they all go through.

use std::sync::Arc;

use gpttrainer_common::{Clock, SystemClock};
use gpttrainer_domain::{Result, TrainerError};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::TrainerConfig;
use crate::http::{HttpTransport, Transport};

use super::cache::ResponseCache;
use super::observer::{ApiErrorEvent, ApiErrorObserver, TracingErrorObserver};

/// Client for the GPT Trainer REST API.
///
/// Construct with [`GptTrainerClient::new`] for production use, or through
/// [`GptTrainerClient::builder`] to inject a transport, observer, or clock.
/// The test-mode flag is derived once from the configured token and never
/// changes afterwards.
pub struct GptTrainerClient<C = SystemClock>
where
    C: Clock + Clone,
{
    config: TrainerConfig,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn ApiErrorObserver>,
    pub(crate) cache: ResponseCache<C>,
    test_mode: bool,
}

impl GptTrainerClient<SystemClock> {
    /// Create a client with the production transport and default observer.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Config`] if the token is empty or the HTTP
    /// client cannot be built.
    pub fn new(config: TrainerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl<C> GptTrainerClient<C>
where
    C: Clock + Clone,
{
    /// Whether this client serves fixture data instead of network calls.
    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Execute one transport call and decode the response into `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let value = self.transport.execute(method, path, body).await?;
        serde_json::from_value(value)
            .map_err(|err| TrainerError::Decode(format!("unexpected response shape: {err}")))
    }

    /// Serialize a request body, mapping the (practically unreachable)
    /// failure into a pre-network validation error.
    pub(crate) fn to_body<T: Serialize>(&self, body: &T) -> Result<Value> {
        serde_json::to_value(body)
            .map_err(|err| TrainerError::Validation(format!("unserializable request body: {err}")))
    }

    /// Route a failed live operation through the error policy.
    ///
    /// Validation, configuration, and not-found errors pass through
    /// untouched. Everything else is reported to the observer and re-raised
    /// wrapped with the operation name.
    pub(crate) fn fail(&self, operation: &'static str, error: TrainerError) -> TrainerError {
        match error {
            err @ (TrainerError::Validation(_)
            | TrainerError::Config(_)
            | TrainerError::NotFound(_)) => err,
            err => {
                self.observer.on_api_error(&ApiErrorEvent::new(operation, &err));
                TrainerError::operation(operation, err)
            }
        }
    }
}

/// Builder for [`GptTrainerClient`].
pub struct ClientBuilder<C = SystemClock>
where
    C: Clock + Clone,
{
    config: Option<TrainerConfig>,
    transport: Option<Arc<dyn Transport>>,
    observer: Option<Arc<dyn ApiErrorObserver>>,
    clock: C,
}

impl Default for ClientBuilder<SystemClock> {
    fn default() -> Self {
        Self { config: None, transport: None, observer: None, clock: SystemClock }
    }
}

impl<C> ClientBuilder<C>
where
    C: Clock + Clone,
{
    /// Set the client configuration (required).
    pub fn config(mut self, config: TrainerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Inject a transport, replacing the production HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Inject an error observer, replacing [`TracingErrorObserver`].
    pub fn observer(mut self, observer: Arc<dyn ApiErrorObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Inject a clock for the response cache (useful for TTL tests).
    pub fn clock<C2>(self, clock: C2) -> ClientBuilder<C2>
    where
        C2: Clock + Clone,
    {
        ClientBuilder {
            config: self.config,
            transport: self.transport,
            observer: self.observer,
            clock,
        }
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Config`] if the configuration is missing, the
    /// token is empty, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<GptTrainerClient<C>> {
        let config = self
            .config
            .ok_or_else(|| TrainerError::Config("client configuration not set".to_string()))?;
        if config.api_token.trim().is_empty() {
            return Err(TrainerError::Config(
                "API token is required but not configured".to_string(),
            ));
        }

        let test_mode = config.is_test_mode();
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };
        let observer = self.observer.unwrap_or_else(|| Arc::new(TracingErrorObserver));
        let cache = ResponseCache::with_clock(config.cache_ttl, self.clock);

        debug!(
            base_url = %config.base_url,
            token_len = config.api_token.len(),
            test_mode,
            "GPT Trainer client configured"
        );

        Ok(GptTrainerClient { config, transport, observer, cache, test_mode })
    }
}

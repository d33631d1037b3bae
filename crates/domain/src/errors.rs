//! Error types used throughout the client

use thiserror::Error;

/// Main error type for GPT Trainer API operations
///
/// The set is closed on purpose: every failure a caller can observe maps to
/// exactly one of these kinds. `Operation` is the context wrapper added by
/// the API client around transport failures; the original error stays
/// reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Missing or invalid configuration detected at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport-level failure (DNS, connection refused, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the remote service
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Response body was not valid JSON (or not the expected shape)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A failed operation with the operation name prefixed for context
    #[error("API error ({operation}): {source}")]
    Operation {
        /// Name of the client operation that failed
        operation: String,
        /// The underlying failure
        #[source]
        source: Box<TrainerError>,
    },
}

impl TrainerError {
    /// Wrap an error with the name of the operation that produced it.
    pub fn operation(operation: impl Into<String>, source: TrainerError) -> Self {
        Self::Operation { operation: operation.into(), source: Box::new(source) }
    }

    /// HTTP status code carried by this error, unwrapping operation context.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Operation { source, .. } => source.status(),
            _ => None,
        }
    }

    /// True for `NotFound`, including when wrapped in operation context.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Operation { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for GPT Trainer operations
pub type Result<T> = std::result::Result<T, TrainerError>;

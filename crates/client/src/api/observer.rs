//! Error observation seam
//!
//! The client does not own error storage; it reports each failed live
//! operation to an injected observer before re-raising. The default
//! observer forwards to the tracing subscriber; hosts with their own log
//! sinks (database tables, notification fan-out) implement the trait and
//! inject themselves at construction.

use gpttrainer_domain::TrainerError;
use tracing::error;

/// Snapshot of a failed API operation, handed to the observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorEvent {
    /// Client operation that failed (e.g. `create_tag`)
    pub operation: String,
    /// Error kind name (e.g. `Network`, `Http`, `Decode`)
    pub kind: &'static str,
    /// Rendered error message
    pub message: String,
    /// HTTP status code, when the failure carries one
    pub status: Option<u16>,
}

impl ApiErrorEvent {
    pub(crate) fn new(operation: &str, error: &TrainerError) -> Self {
        Self {
            operation: operation.to_string(),
            kind: kind_name(error),
            message: error.to_string(),
            status: error.status(),
        }
    }
}

fn kind_name(error: &TrainerError) -> &'static str {
    match error {
        TrainerError::Config(_) => "Config",
        TrainerError::Validation(_) => "Validation",
        TrainerError::Network(_) => "Network",
        TrainerError::Http { .. } => "Http",
        TrainerError::Decode(_) => "Decode",
        TrainerError::NotFound(_) => "NotFound",
        TrainerError::Operation { .. } => "Operation",
    }
}

/// Receives one event per failed live API operation.
pub trait ApiErrorObserver: Send + Sync {
    /// Called before the error is wrapped and re-raised.
    fn on_api_error(&self, event: &ApiErrorEvent);
}

/// Default observer: forwards events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorObserver;

impl ApiErrorObserver for TracingErrorObserver {
    fn on_api_error(&self, event: &ApiErrorEvent) {
        error!(
            operation = %event.operation,
            kind = event.kind,
            status = ?event.status,
            message = %event.message,
            "GPT Trainer API operation failed"
        );
    }
}

//! Test doubles shared by the API unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gpttrainer_domain::{Result, TrainerError};
use reqwest::Method;
use serde_json::Value;

use crate::http::Transport;

/// A transport call as the mock recorded it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Scripted transport: hand it a queue of responses, then assert on the
/// calls the client actually made. The call counter is the backbone of the
/// cache-hit and test-mode assertions.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn enqueue(&self, response: Value) {
        self.responses.lock().expect("mutex poisoned").push_back(Ok(response));
    }

    pub(crate) fn enqueue_error(&self, error: TrainerError) {
        self.responses.lock().expect("mutex poisoned").push_back(Err(error));
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mutex poisoned").clone()
    }
}

/// Client wired to a mock transport; `token` decides live vs test mode.
pub(crate) fn client_with_transport(
    token: &str,
    transport: Arc<MockTransport>,
) -> crate::GptTrainerClient {
    let config = crate::TrainerConfig::new(token).expect("valid config");
    crate::GptTrainerClient::builder()
        .config(config)
        .transport(transport)
        .build()
        .expect("client")
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("mutex poisoned").push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        self.responses
            .lock()
            .expect("mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TrainerError::Network("no scripted response left".to_string())))
    }
}

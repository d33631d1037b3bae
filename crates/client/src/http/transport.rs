use async_trait::async_trait;
use gpttrainer_domain::{Result, TrainerError};
use reqwest::{header, Client as ReqwestClient, Method};
use serde_json::Value;
use tracing::debug;

use crate::config::TrainerConfig;

/// A single request/response cycle against the remote API.
///
/// Implementations perform exactly one attempt; error classification is part
/// of the contract:
/// - network-layer failure (DNS, refused connection, timeout) → [`TrainerError::Network`]
/// - status ≥ 400 → [`TrainerError::Http`] carrying status code and raw body
/// - body that is not valid JSON → [`TrainerError::Decode`]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the decoded JSON body.
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;
}

/// Production transport backed by reqwest.
///
/// Every request carries `Authorization: Bearer <token>`,
/// `Content-Type: application/json`, and `Accept: application/json`, with
/// the configured fixed timeout.
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
    api_token: String,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &TrainerConfig) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(config.timeout).build().map_err(|err| {
            TrainerError::Config(format!("failed to build HTTP client: {err}"))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, has_body = body.is_some(), "sending HTTP request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_token))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_send_error)?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let text = response.text().await.map_err(|err| {
            TrainerError::Network(format!("failed to read response body: {err}"))
        })?;

        if status.as_u16() >= 400 {
            return Err(TrainerError::Http { status: status.as_u16(), body: text });
        }

        serde_json::from_str(&text)
            .map_err(|err| TrainerError::Decode(format!("invalid JSON response: {err}")))
    }
}

fn map_send_error(err: reqwest::Error) -> TrainerError {
    if err.is_timeout() {
        TrainerError::Network(format!("request timed out: {err}"))
    } else {
        TrainerError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn transport_for(uri: &str) -> HttpTransport {
        let config = TrainerConfig::new("secret-token")
            .expect("valid config")
            .with_base_url(uri.to_string());
        HttpTransport::new(&config).expect("transport")
    }

    #[tokio::test]
    async fn sends_auth_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tag/list"))
            .and(header("Authorization", "Bearer secret-token"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(&server.uri());
        let value = transport.execute(Method::GET, "/tag/list", None).await.expect("response");
        assert_eq!(value, serde_json::json!([]));
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        let body = serde_json::json!({ "name": "Beta" });
        Mock::given(method("POST"))
            .and(path("/tag/create"))
            .and(body_json(&body))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "uuid": "t-1", "name": "Beta" })),
            )
            .mount(&server)
            .await;

        let transport = transport_for(&server.uri());
        let value = transport
            .execute(Method::POST, "/tag/create", Some(body))
            .await
            .expect("response");
        assert_eq!(value["uuid"], "t-1");
    }

    #[tokio::test]
    async fn status_400_and_above_becomes_http_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such chatbot"))
            .mount(&server)
            .await;

        let transport = transport_for(&server.uri());
        let err = transport
            .execute(Method::GET, "/chatbot/missing", None)
            .await
            .expect_err("should fail");
        match err {
            TrainerError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such chatbot");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_body_becomes_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let transport = transport_for(&server.uri());
        let err = transport.execute(Method::GET, "/chatbots", None).await.expect_err("should fail");
        assert!(matches!(err, TrainerError::Decode(_)));
    }

    #[tokio::test]
    async fn connection_refused_becomes_network_error() {
        // Bind then drop a listener so the port refuses connections
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let transport = transport_for(&format!("http://{addr}"));
        let err = transport.execute(Method::GET, "/chatbots", None).await.expect_err("should fail");
        assert!(matches!(err, TrainerError::Network(_)));
    }

    #[tokio::test]
    async fn trailing_slash_on_base_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chatbots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(&format!("{}/", server.uri()));
        transport.execute(Method::GET, "/chatbots", None).await.expect("response");
    }
}

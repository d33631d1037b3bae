//! Data source operations
//!
//! Full CRUD plus retrain and bulk delete, and the three convenience
//! constructors (file, URL, Q&A) that validate and sanitize their input
//! before any request body exists. The read-all list is cached; every
//! mutation drops that cache entry.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use gpttrainer_common::Clock;
use gpttrainer_domain::{
    Acknowledgment, DataSource, DataSourcePayload, DataSourceUpdate, DeleteOutcome, FileUpload,
    NewDataSource, QaPair, Result, TrainerError,
};
use reqwest::Method;
use tracing::{debug, info, warn};

use crate::{fixtures, validation};

use super::client::GptTrainerClient;

impl<C> GptTrainerClient<C>
where
    C: Clock + Clone,
{
    /// Create a data source from an already-assembled payload.
    ///
    /// Invalidates the cached data source list on success.
    pub async fn create_data_source(&self, source: NewDataSource) -> Result<DataSource> {
        debug!(kind = source.payload.kind(), "creating data source");

        if self.is_test_mode() {
            return Ok(fixtures::created_data_source(&source));
        }

        let body = self.to_body(&source)?;
        let created: DataSource = self
            .send(Method::POST, "/data-sources", Some(body))
            .await
            .map_err(|err| self.fail("create_data_source", err))?;

        self.cache.invalidate_data_sources();
        info!(uuid = %created.uuid, "data source created");
        Ok(created)
    }

    /// Create a file-backed data source from a local upload.
    ///
    /// The upload must point at a real file whose declared MIME type is on
    /// the configured allow-list; the bytes are base64-encoded into the
    /// request body.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Validation`] before any network call if the
    /// upload handle is invalid, unreadable, or of a disallowed type.
    pub async fn create_file_data_source(
        &self,
        name: &str,
        upload: &FileUpload,
        tags: Vec<String>,
    ) -> Result<DataSource> {
        validation::validate_upload(upload)?;
        validation::validate_mime_type(&upload.mime_type, &self.config().allowed_mime_types)?;

        let bytes = tokio::fs::read(&upload.path).await.map_err(|err| {
            TrainerError::Validation(format!("failed to read uploaded file: {err}"))
        })?;

        let source = NewDataSource {
            name: validation::sanitize_text(name),
            payload: DataSourcePayload::File {
                content: BASE64.encode(&bytes),
                filename: validation::sanitize_file_name(&upload.file_name),
                mime_type: validation::sanitize_text(&upload.mime_type),
            },
            tags: sanitize_tags(tags),
        };

        self.create_data_source(source).await
    }

    /// Create a URL-backed data source.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Validation`] before any network call if the
    /// URL is malformed or not http(s).
    pub async fn create_url_data_source(
        &self,
        name: &str,
        url: &str,
        tags: Vec<String>,
    ) -> Result<DataSource> {
        let url = validation::validate_url(url)?;

        let source = NewDataSource {
            name: validation::sanitize_text(name),
            payload: DataSourcePayload::Url { url },
            tags: sanitize_tags(tags),
        };

        self.create_data_source(source).await
    }

    /// Create a Q&A data source.
    ///
    /// Questions are reduced to plain text; answers keep a safe HTML subset.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Validation`] before any network call if any
    /// pair is missing its question or answer.
    pub async fn create_qa_data_source(
        &self,
        name: &str,
        qa_pairs: &[QaPair],
        tags: Vec<String>,
    ) -> Result<DataSource> {
        let qa_pairs = validation::sanitize_qa_pairs(qa_pairs)?;

        let source = NewDataSource {
            name: validation::sanitize_text(name),
            payload: DataSourcePayload::Qa { qa_pairs },
            tags: sanitize_tags(tags),
        };

        self.create_data_source(source).await
    }

    /// List all data sources, served from cache within the TTL window.
    pub async fn get_all_data_sources(&self) -> Result<Vec<DataSource>> {
        debug!("getting all data sources");

        if self.is_test_mode() {
            return Ok(fixtures::data_sources());
        }

        if let Some(cached) = self.cache.data_sources() {
            return Ok(cached);
        }

        let sources: Vec<DataSource> = self
            .send(Method::GET, "/data-sources", None)
            .await
            .map_err(|err| self.fail("get_all_data_sources", err))?;

        self.cache.store_data_sources(sources.clone());
        Ok(sources)
    }

    /// Fetch one data source by uuid. Never cached.
    pub async fn get_data_source(&self, uuid: &str) -> Result<DataSource> {
        debug!(uuid, "getting data source");

        if self.is_test_mode() {
            return Ok(fixtures::data_source(uuid));
        }

        self.send(Method::GET, &format!("/data-sources/{uuid}"), None)
            .await
            .map_err(|err| self.fail("get_data_source", err))
    }

    /// Update a data source. Invalidates the cached list on success.
    pub async fn update_data_source(
        &self,
        uuid: &str,
        update: DataSourceUpdate,
    ) -> Result<DataSource> {
        debug!(uuid, "updating data source");

        if self.is_test_mode() {
            return Ok(fixtures::updated_data_source(uuid, &update));
        }

        let body = self.to_body(&update)?;
        let updated: DataSource = self
            .send(Method::PUT, &format!("/data-sources/{uuid}"), Some(body))
            .await
            .map_err(|err| self.fail("update_data_source", err))?;

        self.cache.invalidate_data_sources();
        info!(uuid, "data source updated");
        Ok(updated)
    }

    /// Delete a data source. Invalidates the cached list on success.
    pub async fn delete_data_source(&self, uuid: &str) -> Result<Acknowledgment> {
        debug!(uuid, "deleting data source");

        if self.is_test_mode() {
            return Ok(fixtures::deleted("data source"));
        }

        let ack: Acknowledgment = self
            .send(Method::DELETE, &format!("/data-sources/{uuid}"), None)
            .await
            .map_err(|err| self.fail("delete_data_source", err))?;

        self.cache.invalidate_data_sources();
        info!(uuid, "data source deleted");
        Ok(ack)
    }

    /// Trigger a retrain of a data source.
    pub async fn retrain_data_source(&self, uuid: &str) -> Result<Acknowledgment> {
        debug!(uuid, "retraining data source");

        if self.is_test_mode() {
            return Ok(fixtures::retrained());
        }

        self.send(Method::POST, &format!("/data-sources/{uuid}/retrain"), None)
            .await
            .map_err(|err| self.fail("retrain_data_source", err))
    }

    /// Delete several data sources, tolerating per-uuid failures.
    ///
    /// Each uuid gets its own [`DeleteOutcome`]; a failure is captured into
    /// the map and the remaining deletions continue.
    pub async fn delete_multiple_data_sources(
        &self,
        uuids: &[String],
    ) -> BTreeMap<String, DeleteOutcome> {
        let mut results = BTreeMap::new();

        for uuid in uuids {
            match self.delete_data_source(uuid).await {
                Ok(ack) => {
                    results.insert(uuid.clone(), DeleteOutcome::Deleted(ack));
                }
                Err(err) => {
                    warn!(uuid = %uuid, error = %err, "bulk delete: data source failed");
                    results.insert(uuid.clone(), DeleteOutcome::Failed { error: err.to_string() });
                }
            }
        }

        results
    }
}

fn sanitize_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter().map(|tag| validation::sanitize_text(tag)).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use base64::Engine as _;
    use gpttrainer_domain::TrainerError;
    use serde_json::json;

    use crate::api::testing::{client_with_transport, MockTransport};
    use crate::config::TEST_TOKEN;

    use super::*;

    fn list_response() -> serde_json::Value {
        json!([
            { "uuid": "ds-1", "name": "Handbook", "type": "file" },
            { "uuid": "ds-2", "name": "FAQ", "type": "qa" }
        ])
    }

    #[tokio::test]
    async fn create_then_get_echoes_supplied_fields() {
        let transport = MockTransport::new();
        transport.enqueue(json!({
            "uuid": "ds-9",
            "name": "Docs site",
            "type": "url",
            "tags": ["docs"],
            "created_at": "2025-06-01 09:00:00"
        }));
        transport.enqueue(json!({
            "uuid": "ds-9",
            "name": "Docs site",
            "type": "url",
            "tags": ["docs"],
            "created_at": "2025-06-01 09:00:00"
        }));

        let client = client_with_transport("live-token", transport.clone());
        let created = client
            .create_url_data_source("Docs site", "https://example.com/docs", vec!["docs".to_string()])
            .await
            .expect("created");

        let fetched = client.get_data_source(&created.uuid).await.expect("fetched");
        assert_eq!(fetched.uuid, created.uuid);
        assert_eq!(fetched.name, "Docs site");
        assert_eq!(fetched.tags, vec!["docs".to_string()]);

        let requests = transport.requests();
        assert_eq!(requests[0].path, "/data-sources");
        assert_eq!(requests[0].body.as_ref().expect("body")["type"], "url");
        assert_eq!(requests[1].path, "/data-sources/ds-9");
    }

    #[tokio::test]
    async fn get_all_hits_cache_until_a_write_invalidates_it() {
        let transport = MockTransport::new();
        transport.enqueue(list_response());

        let client = client_with_transport("live-token", transport.clone());

        let first = client.get_all_data_sources().await.expect("list");
        let second = client.get_all_data_sources().await.expect("list");
        assert_eq!(first, second);
        assert_eq!(transport.call_count(), 1);

        // A create drops the cache entry; the next read goes to transport
        transport.enqueue(json!({ "uuid": "ds-3", "name": "New", "type": "url" }));
        transport.enqueue(list_response());

        client
            .create_url_data_source("New", "https://example.com", Vec::new())
            .await
            .expect("created");
        client.get_all_data_sources().await.expect("list");
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn qa_pair_missing_answer_fails_before_any_transport_call() {
        let transport = MockTransport::new();
        let client = client_with_transport("live-token", transport.clone());

        let pairs =
            vec![QaPair { question: "How do I log in?".to_string(), answer: String::new() }];
        let err = client
            .create_qa_data_source("FAQ", &pairs, Vec::new())
            .await
            .expect_err("should fail");

        assert!(matches!(err, TrainerError::Validation(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn file_upload_is_read_encoded_and_sanitized() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"hello trainer").expect("write");

        let upload = FileUpload {
            path: file.path().to_path_buf(),
            file_name: "notes (draft).txt".to_string(),
            mime_type: "text/plain".to_string(),
        };

        let transport = MockTransport::new();
        transport.enqueue(json!({ "uuid": "ds-7", "name": "Notes", "type": "file" }));

        let client = client_with_transport("live-token", transport.clone());
        client
            .create_file_data_source("Notes", &upload, Vec::new())
            .await
            .expect("created");

        let requests = transport.requests();
        let body = requests[0].body.as_ref().expect("body");
        assert_eq!(body["type"], "file");
        assert_eq!(body["filename"], "notesdraft.txt");
        assert_eq!(body["content"], BASE64.encode(b"hello trainer"));
    }

    #[tokio::test]
    async fn disallowed_mime_type_is_rejected_without_transport() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let upload = FileUpload {
            path: file.path().to_path_buf(),
            file_name: "tool.exe".to_string(),
            mime_type: "application/x-msdownload".to_string(),
        };

        let transport = MockTransport::new();
        let client = client_with_transport("live-token", transport.clone());

        let err = client
            .create_file_data_source("Tool", &upload, Vec::new())
            .await
            .expect_err("should fail");
        assert!(matches!(err, TrainerError::Validation(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_an_invalid_upload() {
        let upload = FileUpload {
            path: "/nonexistent/upload.txt".into(),
            file_name: "upload.txt".to_string(),
            mime_type: "text/plain".to_string(),
        };

        let transport = MockTransport::new();
        let client = client_with_transport("live-token", transport.clone());

        let err = client
            .create_file_data_source("Upload", &upload, Vec::new())
            .await
            .expect_err("should fail");
        assert!(matches!(err, TrainerError::Validation(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn bulk_delete_tolerates_per_uuid_failures() {
        let transport = MockTransport::new();
        transport.enqueue(json!({ "success": true }));
        transport.enqueue_error(TrainerError::Http { status: 500, body: "boom".to_string() });

        let client = client_with_transport("live-token", transport.clone());
        let uuids = vec!["a".to_string(), "b".to_string()];
        let results = client.delete_multiple_data_sources(&uuids).await;

        assert!(results["a"].is_success());
        assert!(!results["b"].is_success());
        match &results["b"] {
            DeleteOutcome::Failed { error } => assert!(error.contains("delete_data_source")),
            other => panic!("expected failure, got {other:?}"),
        }
        // Both deletions were attempted despite the failure
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn retrain_posts_to_the_retrain_endpoint() {
        let transport = MockTransport::new();
        transport.enqueue(json!({ "success": true, "message": "queued" }));

        let client = client_with_transport("live-token", transport.clone());
        let ack = client.retrain_data_source("ds-1").await.expect("ack");

        assert!(ack.success);
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/data-sources/ds-1/retrain");
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_mode_serves_fixtures_without_transport() {
        let transport = MockTransport::new();
        let client = client_with_transport(TEST_TOKEN, transport.clone());

        let sources = client.get_all_data_sources().await.expect("fixtures");
        assert_eq!(sources.len(), 2);
        assert!(sources[0].uuid.starts_with("test-"));

        let created = client
            .create_url_data_source("Fresh", "https://example.com", Vec::new())
            .await
            .expect("fixture create");
        assert!(created.uuid.starts_with("test-"));
        assert_eq!(created.name, "Fresh");

        assert_eq!(transport.call_count(), 0);
    }
}

//! Data source types
//!
//! A data source is one of three shapes on the wire, selected by the `type`
//! field: an uploaded file (base64 content), a crawlable URL, or a list of
//! question/answer pairs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A data source as returned by the remote service.
///
/// Responses are read permissively: fields the service may omit are optional
/// and unrecognized fields land in `extra` instead of failing the decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSource {
    pub uuid: String,
    pub name: String,
    /// Wire field `type` (`file`, `url`, `qa`, or service-defined values)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One question/answer pair of a Q&A data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Type-specific payload of a new data source.
///
/// Flattened into [`NewDataSource`] so the request body carries
/// `"type": "file" | "url" | "qa"` next to the per-type fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataSourcePayload {
    /// An uploaded file; `content` is the base64-encoded file bytes
    File { content: String, filename: String, mime_type: String },
    /// A URL for the service to fetch
    Url { url: String },
    /// A list of question/answer pairs
    Qa { qa_pairs: Vec<QaPair> },
}

impl DataSourcePayload {
    /// Wire value of the `type` tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Url { .. } => "url",
            Self::Qa { .. } => "qa",
        }
    }
}

/// Request body for creating a data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDataSource {
    pub name: String,
    #[serde(flatten)]
    pub payload: DataSourcePayload,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Request body for updating a data source; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DataSourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A local file handed to `create_file_data_source` before upload validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Path of the file on disk
    pub path: PathBuf,
    /// Original file name, sanitized before it goes on the wire
    pub file_name: String,
    /// Declared MIME type, checked against the configured allow-list
    pub mime_type: String,
}

//! Content analysis types
//!
//! The analysis operation submits a prompt template together with a content
//! payload and gets back a structured result. None of it is cached.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentPayload {
    pub title: String,
    /// Wire field `content`: the main body text
    #[serde(rename = "content")]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excerpt: String,
    /// Free-form metadata forwarded alongside the text
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl ContentPayload {
    /// Payload with just title and body, the minimal useful shape.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into(), excerpt: String::new(), meta: Map::new() }
    }
}

/// Request body for the analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    /// Prompt template; must contain the `{content}` placeholder
    pub prompt: String,
    pub content: ContentPayload,
}

/// Structured result of a content analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_analysis_response_decodes_to_defaults() {
        let result: AnalysisResult =
            serde_json::from_value(serde_json::json!({ "summary": "Short doc." }))
                .expect("decodes");
        assert_eq!(result.summary.as_deref(), Some("Short doc."));
        assert!(result.key_points.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn payload_body_serializes_as_content() {
        let payload = ContentPayload::new("Title", "Body text");
        let value = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(value["content"], "Body text");
        assert!(value.get("excerpt").is_none());
    }
}

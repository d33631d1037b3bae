//! Chatbot types
//!
//! Chatbot responses from the service are not fully trustworthy: `meta` may
//! be missing, and `meta.visibility` may hold values outside the documented
//! enum. The raw wire shape keeps those fields loose; the client's
//! normalization pass rewrites them before anything reaches a caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chatbot visibility, defaulting to private for anything unrecognized.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    /// Parse a wire value; anything but `public`/`private` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// The `meta` object attached to a chatbot.
///
/// `visibility` stays a raw string here so an out-of-enum value survives
/// decoding and can be coerced (with a diagnostic) instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatbotMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A chatbot as returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chatbot {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChatbotMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Chatbot {
    /// Effective visibility; missing or unrecognized values read as private.
    pub fn visibility(&self) -> Visibility {
        self.meta
            .as_ref()
            .and_then(|meta| meta.visibility.as_deref())
            .and_then(Visibility::parse)
            .unwrap_or_default()
    }
}

/// Request body for creating a chatbot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewChatbot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChatbotMeta>,
}

/// Request body for updating a chatbot; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChatbotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChatbotMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_meta_reads_as_private() {
        let raw = serde_json::json!({ "uuid": "cb-1", "name": "Support" });
        let chatbot: Chatbot = serde_json::from_value(raw).expect("decodes");
        assert!(chatbot.meta.is_none());
        assert_eq!(chatbot.visibility(), Visibility::Private);
    }

    #[test]
    fn unrecognized_visibility_reads_as_private() {
        let raw = serde_json::json!({
            "uuid": "cb-2",
            "name": "Sales",
            "meta": { "visibility": "internal", "theme": "dark" }
        });
        let chatbot: Chatbot = serde_json::from_value(raw).expect("decodes");
        assert_eq!(chatbot.visibility(), Visibility::Private);
        // The out-of-enum raw value is preserved for the normalization pass
        let meta = chatbot.meta.expect("meta present");
        assert_eq!(meta.visibility.as_deref(), Some("internal"));
        assert_eq!(meta.extra["theme"], "dark");
    }

    #[test]
    fn valid_public_visibility_is_preserved() {
        let raw = serde_json::json!({
            "uuid": "cb-3",
            "name": "Docs",
            "meta": { "visibility": "public" }
        });
        let chatbot: Chatbot = serde_json::from_value(raw).expect("decodes");
        assert_eq!(chatbot.visibility(), Visibility::Public);
    }
}

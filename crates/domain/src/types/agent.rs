//! Agent types
//!
//! Agents belong to a chatbot; creation and listing are scoped by the owning
//! chatbot's uuid while get/update/delete address the agent directly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An agent as returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for creating an agent under a chatbot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAgent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for updating an agent; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

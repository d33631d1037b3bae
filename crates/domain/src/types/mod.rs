//! Domain types for the four resource kinds and the analysis operation

pub mod agent;
pub mod analysis;
pub mod chatbot;
pub mod data_source;
pub mod tag;

use serde::{Deserialize, Serialize};

// Re-export resource types for convenience
pub use agent::{Agent, AgentUpdate, NewAgent};
pub use analysis::{AnalysisRequest, AnalysisResult, ContentPayload};
pub use chatbot::{Chatbot, ChatbotMeta, ChatbotUpdate, NewChatbot, Visibility};
pub use data_source::{
    DataSource, DataSourcePayload, DataSourceUpdate, FileUpload, NewDataSource, QaPair,
};
pub use tag::{NewTag, Tag, TagUpdate};

/// Acknowledgment returned by delete and retrain calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgment {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Per-uuid result of a bulk delete.
///
/// A failure on one uuid never aborts the remaining deletions; callers get
/// one outcome per requested uuid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The delete call succeeded
    Deleted(Acknowledgment),
    /// The delete call failed; the error message is captured verbatim
    Failed {
        /// Message of the error that aborted this uuid's deletion
        error: String,
    },
}

impl DeleteOutcome {
    /// True when this uuid was deleted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

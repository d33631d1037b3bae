//! Test-mode fixture data
//!
//! When the client is constructed with the sentinel token, every operation
//! returns data from here instead of touching the network. Fixtures are
//! shaped exactly like live responses: same field names, same timestamp
//! format, uuids carrying a `test-` prefix so they can never be mistaken
//! for live identifiers. Nothing persists between calls.

use chrono::{Duration, Utc};
use gpttrainer_domain::{
    Acknowledgment, Agent, AgentUpdate, AnalysisResult, Chatbot, ChatbotMeta, ChatbotUpdate,
    ContentPayload, DataSource, DataSourceUpdate, NewAgent, NewChatbot, NewDataSource, NewTag,
    Tag, TagUpdate, Visibility,
};
use serde_json::Map;
use uuid::Uuid;

use crate::prompts;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A fresh fixture uuid: the given prefix plus a unique suffix.
fn fixture_uuid(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().as_simple())
}

/// Wall-clock timestamp `days_ago` days in the past, in the wire format.
fn timestamp(days_ago: i64) -> String {
    (Utc::now() - Duration::days(days_ago)).format(TIMESTAMP_FORMAT).to_string()
}

fn meta_with_visibility(visibility: Visibility) -> ChatbotMeta {
    ChatbotMeta { visibility: Some(visibility.as_str().to_string()), extra: Map::new() }
}

// =============================================================================
// Data sources
// =============================================================================

pub(crate) fn data_sources() -> Vec<DataSource> {
    vec![
        DataSource {
            uuid: "test-data-source-1".to_string(),
            name: "Test Data Source 1".to_string(),
            source_type: Some("text".to_string()),
            description: Some("A test data source for development".to_string()),
            content: None,
            created_at: Some(timestamp(5)),
            updated_at: None,
            tags: vec!["test".to_string(), "development".to_string()],
            extra: Map::new(),
        },
        DataSource {
            uuid: "test-data-source-2".to_string(),
            name: "Test Data Source 2".to_string(),
            source_type: Some("file".to_string()),
            description: Some("Another test data source".to_string()),
            content: None,
            created_at: Some(timestamp(2)),
            updated_at: None,
            tags: vec!["test".to_string()],
            extra: Map::new(),
        },
    ]
}

pub(crate) fn data_source(uuid: &str) -> DataSource {
    DataSource {
        uuid: uuid.to_string(),
        name: "Test Data Source".to_string(),
        source_type: Some("text".to_string()),
        description: Some("A test data source for development".to_string()),
        content: Some("Test content".to_string()),
        created_at: Some(timestamp(5)),
        updated_at: None,
        tags: vec!["test".to_string(), "development".to_string()],
        extra: Map::new(),
    }
}

/// Echo of a create call: supplied fields come back, the service-side ones
/// are synthesized.
pub(crate) fn created_data_source(source: &NewDataSource) -> DataSource {
    DataSource {
        uuid: fixture_uuid("test-"),
        name: source.name.clone(),
        source_type: Some(source.payload.kind().to_string()),
        description: None,
        content: None,
        created_at: Some(timestamp(0)),
        updated_at: None,
        tags: source.tags.clone(),
        extra: Map::new(),
    }
}

pub(crate) fn updated_data_source(uuid: &str, update: &DataSourceUpdate) -> DataSource {
    DataSource {
        uuid: uuid.to_string(),
        name: update.name.clone().unwrap_or_else(|| "Test Data Source".to_string()),
        source_type: Some("text".to_string()),
        description: update.description.clone(),
        content: None,
        created_at: Some(timestamp(5)),
        updated_at: Some(timestamp(0)),
        tags: update.tags.clone().unwrap_or_default(),
        extra: Map::new(),
    }
}

// =============================================================================
// Chatbots
// =============================================================================

/// The fixed fixture list `get_chatbot` searches by uuid.
pub(crate) fn chatbots() -> Vec<Chatbot> {
    vec![
        Chatbot {
            uuid: "test-1".to_string(),
            name: "Test Chatbot 1".to_string(),
            description: Some("A test chatbot for development".to_string()),
            data_sources_count: Some(2),
            meta: Some(meta_with_visibility(Visibility::Public)),
            created_at: Some(timestamp(1)),
            updated_at: Some(timestamp(0)),
        },
        Chatbot {
            uuid: "test-2".to_string(),
            name: "Test Chatbot 2".to_string(),
            description: Some("Another test chatbot".to_string()),
            data_sources_count: Some(1),
            meta: Some(meta_with_visibility(Visibility::Private)),
            created_at: Some(timestamp(2)),
            updated_at: Some(timestamp(1)),
        },
    ]
}

pub(crate) fn created_chatbot(chatbot: &NewChatbot) -> Chatbot {
    Chatbot {
        uuid: fixture_uuid("test-"),
        name: chatbot.name.clone(),
        description: chatbot.description.clone(),
        data_sources_count: Some(0),
        meta: Some(
            chatbot.meta.clone().unwrap_or_else(|| meta_with_visibility(Visibility::Private)),
        ),
        created_at: Some(timestamp(0)),
        updated_at: None,
    }
}

/// Merge of the first fixture chatbot with the requested changes, like the
/// service would echo back.
pub(crate) fn updated_chatbot(uuid: &str, update: &ChatbotUpdate) -> Chatbot {
    Chatbot {
        uuid: uuid.to_string(),
        name: update.name.clone().unwrap_or_else(|| "Test Chatbot 1".to_string()),
        description: update
            .description
            .clone()
            .or_else(|| Some("A test chatbot for development".to_string())),
        data_sources_count: Some(2),
        meta: Some(
            update.meta.clone().unwrap_or_else(|| meta_with_visibility(Visibility::Public)),
        ),
        created_at: Some(timestamp(1)),
        updated_at: Some(timestamp(0)),
    }
}

// =============================================================================
// Agents
// =============================================================================

pub(crate) fn agents() -> Vec<Agent> {
    vec![
        Agent {
            uuid: "test-agent-1".to_string(),
            name: "Test Agent 1".to_string(),
            description: Some("A test agent for development".to_string()),
            created_at: Some(timestamp(5)),
            updated_at: None,
            extra: Map::new(),
        },
        Agent {
            uuid: "test-agent-2".to_string(),
            name: "Test Agent 2".to_string(),
            description: Some("Another test agent for development".to_string()),
            created_at: Some(timestamp(2)),
            updated_at: None,
            extra: Map::new(),
        },
    ]
}

pub(crate) fn agent(uuid: &str) -> Agent {
    Agent {
        uuid: uuid.to_string(),
        name: "Test Agent".to_string(),
        description: Some("A test agent for development".to_string()),
        created_at: Some(timestamp(5)),
        updated_at: None,
        extra: Map::new(),
    }
}

pub(crate) fn created_agent(agent: &NewAgent) -> Agent {
    Agent {
        uuid: fixture_uuid("test-agent-"),
        name: agent.name.clone(),
        description: agent.description.clone(),
        created_at: Some(timestamp(0)),
        updated_at: None,
        extra: Map::new(),
    }
}

pub(crate) fn updated_agent(uuid: &str, update: &AgentUpdate) -> Agent {
    Agent {
        uuid: uuid.to_string(),
        name: update.name.clone().unwrap_or_else(|| "Test Agent".to_string()),
        description: update.description.clone(),
        created_at: Some(timestamp(5)),
        updated_at: Some(timestamp(0)),
        extra: Map::new(),
    }
}

// =============================================================================
// Tags
// =============================================================================

pub(crate) fn tags() -> Vec<Tag> {
    vec![
        Tag {
            uuid: "test-tag-1".to_string(),
            name: "Test Tag 1".to_string(),
            description: Some("A test tag for development".to_string()),
            created_at: Some(timestamp(5)),
            updated_at: None,
        },
        Tag {
            uuid: "test-tag-2".to_string(),
            name: "Test Tag 2".to_string(),
            description: Some("Another test tag for development".to_string()),
            created_at: Some(timestamp(2)),
            updated_at: None,
        },
    ]
}

pub(crate) fn tag(uuid: &str) -> Tag {
    Tag {
        uuid: uuid.to_string(),
        name: "Test Tag".to_string(),
        description: Some("A test tag for development".to_string()),
        created_at: Some(timestamp(5)),
        updated_at: None,
    }
}

pub(crate) fn created_tag(tag: &NewTag) -> Tag {
    Tag {
        uuid: fixture_uuid("test-tag-"),
        name: tag.name.clone(),
        description: tag.description.clone(),
        created_at: Some(timestamp(0)),
        updated_at: None,
    }
}

pub(crate) fn updated_tag(uuid: &str, update: &TagUpdate) -> Tag {
    Tag {
        uuid: uuid.to_string(),
        name: update.name.clone().unwrap_or_else(|| "Test Tag".to_string()),
        description: update.description.clone(),
        created_at: Some(timestamp(5)),
        updated_at: Some(timestamp(0)),
    }
}

// =============================================================================
// Acknowledgments & analysis
// =============================================================================

pub(crate) fn deleted(kind: &str) -> Acknowledgment {
    Acknowledgment { success: true, message: Some(format!("Test {kind} deleted")) }
}

pub(crate) fn retrained() -> Acknowledgment {
    Acknowledgment { success: true, message: Some("Test data source retrained".to_string()) }
}

/// Deterministic analysis shaped like a live response, derived from the
/// submitted payload so assertions can tie results back to inputs.
pub(crate) fn analysis(prompt: &str, content: &ContentPayload) -> AnalysisResult {
    let rendered = prompts::render(prompt, &content.title);
    let word_count = content.body.split_whitespace().count();

    let mut metadata = Map::new();
    metadata.insert("word_count".to_string(), word_count.into());
    metadata.insert("prompt".to_string(), rendered.into());

    AnalysisResult {
        summary: Some(format!("Test analysis of \"{}\"", content.title)),
        key_points: vec![
            format!("The content contains {word_count} words"),
            "Test key point for development".to_string(),
        ],
        suggestions: vec!["Test suggestion: expand the introduction".to_string()],
        metadata,
    }
}

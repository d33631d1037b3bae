//! Response cache policy
//!
//! One entry per (collection, scope): the three global collections plus one
//! `agents:{chatbot_uuid}` entry per chatbot. Entries live for the
//! configured TTL (5 minutes by default) and are removed by any mutating
//! call on the same collection. Single-resource reads are never cached.

use std::time::Duration;

use gpttrainer_common::{Clock, SystemClock, TtlCache};
use gpttrainer_domain::{Agent, Chatbot, DataSource, Tag};
use tracing::debug;

const DATA_SOURCES_KEY: &str = "data_sources";
const CHATBOTS_KEY: &str = "chatbots";
const TAGS_KEY: &str = "tags";
const AGENTS_KEY_PREFIX: &str = "agents:";

/// TTL caches for the read-all collections, one per resource kind.
pub struct ResponseCache<C = SystemClock>
where
    C: Clock + Clone,
{
    data_sources: TtlCache<String, Vec<DataSource>, C>,
    chatbots: TtlCache<String, Vec<Chatbot>, C>,
    agents: TtlCache<String, Vec<Agent>, C>,
    tags: TtlCache<String, Vec<Tag>, C>,
}

impl<C> ResponseCache<C>
where
    C: Clock + Clone,
{
    /// Create the caches with a shared TTL and clock.
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            data_sources: TtlCache::with_clock(ttl, clock.clone()),
            chatbots: TtlCache::with_clock(ttl, clock.clone()),
            agents: TtlCache::with_clock(ttl, clock.clone()),
            tags: TtlCache::with_clock(ttl, clock),
        }
    }

    fn agents_key(chatbot_uuid: &str) -> String {
        format!("{AGENTS_KEY_PREFIX}{chatbot_uuid}")
    }

    pub(crate) fn data_sources(&self) -> Option<Vec<DataSource>> {
        let hit = self.data_sources.get(&DATA_SOURCES_KEY.to_string());
        debug!(key = DATA_SOURCES_KEY, hit = hit.is_some(), "response cache lookup");
        hit
    }

    pub(crate) fn store_data_sources(&self, sources: Vec<DataSource>) {
        self.data_sources.insert(DATA_SOURCES_KEY.to_string(), sources);
    }

    pub(crate) fn invalidate_data_sources(&self) {
        debug!(key = DATA_SOURCES_KEY, "response cache invalidated");
        self.data_sources.invalidate(&DATA_SOURCES_KEY.to_string());
    }

    pub(crate) fn chatbots(&self) -> Option<Vec<Chatbot>> {
        let hit = self.chatbots.get(&CHATBOTS_KEY.to_string());
        debug!(key = CHATBOTS_KEY, hit = hit.is_some(), "response cache lookup");
        hit
    }

    pub(crate) fn store_chatbots(&self, chatbots: Vec<Chatbot>) {
        self.chatbots.insert(CHATBOTS_KEY.to_string(), chatbots);
    }

    pub(crate) fn invalidate_chatbots(&self) {
        debug!(key = CHATBOTS_KEY, "response cache invalidated");
        self.chatbots.invalidate(&CHATBOTS_KEY.to_string());
    }

    pub(crate) fn agents(&self, chatbot_uuid: &str) -> Option<Vec<Agent>> {
        let key = Self::agents_key(chatbot_uuid);
        let hit = self.agents.get(&key);
        debug!(key = %key, hit = hit.is_some(), "response cache lookup");
        hit
    }

    pub(crate) fn store_agents(&self, chatbot_uuid: &str, agents: Vec<Agent>) {
        self.agents.insert(Self::agents_key(chatbot_uuid), agents);
    }

    /// Invalidate a single chatbot's agent list.
    pub(crate) fn invalidate_agents(&self, chatbot_uuid: &str) {
        let key = Self::agents_key(chatbot_uuid);
        debug!(key = %key, "response cache invalidated");
        self.agents.invalidate(&key);
    }

    /// Invalidate every agent scope. Used when the owning chatbot cannot be
    /// derived from the arguments (agent update/delete address the agent
    /// directly).
    pub(crate) fn invalidate_all_agents(&self) {
        debug!(key = AGENTS_KEY_PREFIX, "response cache invalidated (all scopes)");
        self.agents.invalidate_if(|key| key.starts_with(AGENTS_KEY_PREFIX));
    }

    pub(crate) fn tags(&self) -> Option<Vec<Tag>> {
        let hit = self.tags.get(&TAGS_KEY.to_string());
        debug!(key = TAGS_KEY, hit = hit.is_some(), "response cache lookup");
        hit
    }

    pub(crate) fn store_tags(&self, tags: Vec<Tag>) {
        self.tags.insert(TAGS_KEY.to_string(), tags);
    }

    pub(crate) fn invalidate_tags(&self) {
        debug!(key = TAGS_KEY, "response cache invalidated");
        self.tags.invalidate(&TAGS_KEY.to_string());
    }
}

//! Agent operations
//!
//! Agents are scoped to a chatbot: creation and listing go through the
//! owning chatbot's routes and cache scope, while get/update/delete address
//! the agent uuid directly. Since the owner cannot be derived from an agent
//! uuid, update and delete invalidate every agent scope.

use gpttrainer_common::Clock;
use gpttrainer_domain::{Acknowledgment, Agent, AgentUpdate, NewAgent, Result};
use reqwest::Method;
use tracing::{debug, info};

use crate::fixtures;

use super::client::GptTrainerClient;

impl<C> GptTrainerClient<C>
where
    C: Clock + Clone,
{
    /// Create an agent under a chatbot. Invalidates that chatbot's cached
    /// agent list on success.
    pub async fn create_agent(&self, chatbot_uuid: &str, agent: NewAgent) -> Result<Agent> {
        debug!(chatbot_uuid, name = %agent.name, "creating agent");

        if self.is_test_mode() {
            return Ok(fixtures::created_agent(&agent));
        }

        let body = self.to_body(&agent)?;
        let created: Agent = self
            .send(Method::POST, &format!("/chatbot/{chatbot_uuid}/agent/create"), Some(body))
            .await
            .map_err(|err| self.fail("create_agent", err))?;

        self.cache.invalidate_agents(chatbot_uuid);
        info!(chatbot_uuid, uuid = %created.uuid, "agent created");
        Ok(created)
    }

    /// List a chatbot's agents, served from that scope's cache entry within
    /// the TTL window.
    pub async fn get_all_agents(&self, chatbot_uuid: &str) -> Result<Vec<Agent>> {
        debug!(chatbot_uuid, "getting all agents");

        if self.is_test_mode() {
            return Ok(fixtures::agents());
        }

        if let Some(cached) = self.cache.agents(chatbot_uuid) {
            return Ok(cached);
        }

        let agents: Vec<Agent> = self
            .send(Method::GET, &format!("/chatbot/{chatbot_uuid}/agents"), None)
            .await
            .map_err(|err| self.fail("get_all_agents", err))?;

        self.cache.store_agents(chatbot_uuid, agents.clone());
        Ok(agents)
    }

    /// Fetch one agent by uuid. Never cached.
    pub async fn get_agent(&self, uuid: &str) -> Result<Agent> {
        debug!(uuid, "getting agent");

        if self.is_test_mode() {
            return Ok(fixtures::agent(uuid));
        }

        self.send(Method::GET, &format!("/agent/{uuid}"), None)
            .await
            .map_err(|err| self.fail("get_agent", err))
    }

    /// Update an agent. Invalidates every agent scope on success.
    pub async fn update_agent(&self, uuid: &str, update: AgentUpdate) -> Result<Agent> {
        debug!(uuid, "updating agent");

        if self.is_test_mode() {
            return Ok(fixtures::updated_agent(uuid, &update));
        }

        let body = self.to_body(&update)?;
        let updated: Agent = self
            .send(Method::PUT, &format!("/agent/{uuid}/update"), Some(body))
            .await
            .map_err(|err| self.fail("update_agent", err))?;

        self.cache.invalidate_all_agents();
        info!(uuid, "agent updated");
        Ok(updated)
    }

    /// Delete an agent. Invalidates every agent scope on success.
    pub async fn delete_agent(&self, uuid: &str) -> Result<Acknowledgment> {
        debug!(uuid, "deleting agent");

        if self.is_test_mode() {
            return Ok(fixtures::deleted("agent"));
        }

        let ack: Acknowledgment = self
            .send(Method::DELETE, &format!("/agent/{uuid}/delete"), None)
            .await
            .map_err(|err| self.fail("delete_agent", err))?;

        self.cache.invalidate_all_agents();
        info!(uuid, "agent deleted");
        Ok(ack)
    }
}

//! Chatbot operations
//!
//! Chatbot responses go through a normalization pass before being cached or
//! returned: a missing `meta` object is synthesized, and a missing or
//! out-of-enum `visibility` is forced to `private` with a warning. A 404 on
//! lookup is part of the contract, not an error; `get_chatbot` reports it
//! as `None` by inspecting the typed HTTP error's status code.

use gpttrainer_common::Clock;
use gpttrainer_domain::{
    Acknowledgment, Chatbot, ChatbotMeta, ChatbotUpdate, NewChatbot, Result, TrainerError,
    Visibility,
};
use reqwest::Method;
use tracing::{debug, info, warn};

use crate::fixtures;

use super::client::GptTrainerClient;

impl<C> GptTrainerClient<C>
where
    C: Clock + Clone,
{
    /// Create a chatbot. Invalidates the cached chatbot list on success.
    pub async fn create_chatbot(&self, chatbot: NewChatbot) -> Result<Chatbot> {
        debug!(name = %chatbot.name, "creating chatbot");

        if self.is_test_mode() {
            return Ok(fixtures::created_chatbot(&chatbot));
        }

        let body = self.to_body(&chatbot)?;
        let mut created: Chatbot = self
            .send(Method::POST, "/chatbot/create", Some(body))
            .await
            .map_err(|err| self.fail("create_chatbot", err))?;

        normalize_chatbot(&mut created);
        self.cache.invalidate_chatbots();
        info!(uuid = %created.uuid, "chatbot created");
        Ok(created)
    }

    /// List all chatbots, normalized, served from cache within the TTL
    /// window.
    pub async fn get_all_chatbots(&self) -> Result<Vec<Chatbot>> {
        debug!("getting all chatbots");

        if self.is_test_mode() {
            return Ok(fixtures::chatbots());
        }

        if let Some(cached) = self.cache.chatbots() {
            return Ok(cached);
        }

        let mut chatbots: Vec<Chatbot> = self
            .send(Method::GET, "/chatbots", None)
            .await
            .map_err(|err| self.fail("get_all_chatbots", err))?;

        for chatbot in &mut chatbots {
            normalize_chatbot(chatbot);
        }

        self.cache.store_chatbots(chatbots.clone());
        Ok(chatbots)
    }

    /// Fetch one chatbot by uuid.
    ///
    /// In live mode a 404 from the service resolves to `Ok(None)`. In test
    /// mode an unknown uuid is a [`TrainerError::NotFound`], since the
    /// fixture list is fixed and the miss is a caller mistake.
    pub async fn get_chatbot(&self, uuid: &str) -> Result<Option<Chatbot>> {
        debug!(uuid, "getting chatbot");

        if self.is_test_mode() {
            return fixtures::chatbots()
                .into_iter()
                .find(|chatbot| chatbot.uuid == uuid)
                .map(Some)
                .ok_or_else(|| TrainerError::NotFound(format!("chatbot not found: {uuid}")));
        }

        match self.send::<Chatbot>(Method::GET, &format!("/chatbot/{uuid}"), None).await {
            Ok(mut chatbot) => {
                normalize_chatbot(&mut chatbot);
                Ok(Some(chatbot))
            }
            Err(TrainerError::Http { status: 404, .. }) => {
                debug!(uuid, "chatbot not found");
                Ok(None)
            }
            Err(err) => Err(self.fail("get_chatbot", err)),
        }
    }

    /// Update a chatbot. Invalidates the cached list on success.
    pub async fn update_chatbot(&self, uuid: &str, update: ChatbotUpdate) -> Result<Chatbot> {
        debug!(uuid, "updating chatbot");

        if self.is_test_mode() {
            return Ok(fixtures::updated_chatbot(uuid, &update));
        }

        let body = self.to_body(&update)?;
        let mut updated: Chatbot = self
            .send(Method::POST, &format!("/chatbot/{uuid}/update"), Some(body))
            .await
            .map_err(|err| self.fail("update_chatbot", err))?;

        normalize_chatbot(&mut updated);
        self.cache.invalidate_chatbots();
        info!(uuid, "chatbot updated");
        Ok(updated)
    }

    /// Delete a chatbot. Invalidates the cached list on success.
    pub async fn delete_chatbot(&self, uuid: &str) -> Result<Acknowledgment> {
        debug!(uuid, "deleting chatbot");

        if self.is_test_mode() {
            return Ok(fixtures::deleted("chatbot"));
        }

        let ack: Acknowledgment = self
            .send(Method::DELETE, &format!("/chatbot/{uuid}/delete"), None)
            .await
            .map_err(|err| self.fail("delete_chatbot", err))?;

        self.cache.invalidate_chatbots();
        info!(uuid, "chatbot deleted");
        Ok(ack)
    }
}

/// Force the meta/visibility contract: `meta` always present, `visibility`
/// always one of the two valid values.
fn normalize_chatbot(chatbot: &mut Chatbot) {
    let uuid = chatbot.uuid.clone();
    let meta = chatbot.meta.get_or_insert_with(ChatbotMeta::default);

    if meta.visibility.as_deref().and_then(Visibility::parse).is_none() {
        match meta.visibility.as_deref() {
            Some(raw) => {
                warn!(uuid = %uuid, visibility = raw, "invalid chatbot visibility, forcing private");
            }
            None => warn!(uuid = %uuid, "chatbot visibility missing, defaulting to private"),
        }
        meta.visibility = Some(Visibility::Private.as_str().to_string());
    }
}

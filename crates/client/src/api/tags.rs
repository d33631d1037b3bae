//! Tag operations

use gpttrainer_common::Clock;
use gpttrainer_domain::{Acknowledgment, NewTag, Result, Tag, TagUpdate};
use reqwest::Method;
use tracing::{debug, info};

use crate::fixtures;

use super::client::GptTrainerClient;

impl<C> GptTrainerClient<C>
where
    C: Clock + Clone,
{
    /// Create a tag. Invalidates the cached tag list on success.
    pub async fn create_tag(&self, tag: NewTag) -> Result<Tag> {
        debug!(name = %tag.name, "creating tag");

        if self.is_test_mode() {
            return Ok(fixtures::created_tag(&tag));
        }

        let body = self.to_body(&tag)?;
        let created: Tag = self
            .send(Method::POST, "/tag/create", Some(body))
            .await
            .map_err(|err| self.fail("create_tag", err))?;

        self.cache.invalidate_tags();
        info!(uuid = %created.uuid, "tag created");
        Ok(created)
    }

    /// List all tags, served from cache within the TTL window.
    pub async fn get_all_tags(&self) -> Result<Vec<Tag>> {
        debug!("getting all tags");

        if self.is_test_mode() {
            return Ok(fixtures::tags());
        }

        if let Some(cached) = self.cache.tags() {
            return Ok(cached);
        }

        let tags: Vec<Tag> = self
            .send(Method::GET, "/tag/list", None)
            .await
            .map_err(|err| self.fail("get_all_tags", err))?;

        self.cache.store_tags(tags.clone());
        Ok(tags)
    }

    /// Fetch one tag by uuid. Never cached.
    pub async fn get_tag(&self, uuid: &str) -> Result<Tag> {
        debug!(uuid, "getting tag");

        if self.is_test_mode() {
            return Ok(fixtures::tag(uuid));
        }

        self.send(Method::GET, &format!("/tag/{uuid}"), None)
            .await
            .map_err(|err| self.fail("get_tag", err))
    }

    /// Update a tag. Invalidates the cached list on success.
    pub async fn update_tag(&self, uuid: &str, update: TagUpdate) -> Result<Tag> {
        debug!(uuid, "updating tag");

        if self.is_test_mode() {
            return Ok(fixtures::updated_tag(uuid, &update));
        }

        let body = self.to_body(&update)?;
        let updated: Tag = self
            .send(Method::PUT, &format!("/tag/{uuid}/update"), Some(body))
            .await
            .map_err(|err| self.fail("update_tag", err))?;

        self.cache.invalidate_tags();
        info!(uuid, "tag updated");
        Ok(updated)
    }

    /// Delete a tag. Invalidates the cached list on success.
    pub async fn delete_tag(&self, uuid: &str) -> Result<Acknowledgment> {
        debug!(uuid, "deleting tag");

        if self.is_test_mode() {
            return Ok(fixtures::deleted("tag"));
        }

        let ack: Acknowledgment = self
            .send(Method::DELETE, &format!("/tag/{uuid}/delete"), None)
            .await
            .map_err(|err| self.fail("delete_tag", err))?;

        self.cache.invalidate_tags();
        info!(uuid, "tag deleted");
        Ok(ack)
    }
}

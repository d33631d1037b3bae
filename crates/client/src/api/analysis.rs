//! Content analysis
//!
//! Submits a prompt template together with a content payload and returns
//! the structured result. Analysis is side-effect free from the cache's
//! point of view: nothing is stored and nothing is invalidated.

use gpttrainer_common::Clock;
use gpttrainer_domain::{AnalysisRequest, AnalysisResult, ContentPayload, Result};
use reqwest::Method;
use tracing::debug;

use crate::{fixtures, prompts};

use super::client::GptTrainerClient;

impl<C> GptTrainerClient<C>
where
    C: Clock + Clone,
{
    /// Analyze content with a prompt template.
    ///
    /// The template must contain the `{content}` placeholder; the payload
    /// travels alongside it so the service performs the substitution.
    ///
    /// # Errors
    ///
    /// Returns [`gpttrainer_domain::TrainerError::Validation`] before any
    /// network call if the template lacks the placeholder.
    pub async fn analyze_content(
        &self,
        prompt: &str,
        content: ContentPayload,
    ) -> Result<AnalysisResult> {
        prompts::validate_template(prompt)?;

        debug!(title = %content.title, "analyzing content");

        if self.is_test_mode() {
            return Ok(fixtures::analysis(prompt, &content));
        }

        let request = AnalysisRequest { prompt: prompt.to_string(), content };
        let body = self.to_body(&request)?;

        self.send(Method::POST, "/analyze", Some(body))
            .await
            .map_err(|err| self.fail("analyze_content", err))
    }
}

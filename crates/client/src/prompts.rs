//! Prompt template library
//!
//! Content analysis takes a prompt template with a `{content}` placeholder.
//! The library maps content types to their templates and supplies the stock
//! prompts for the four built-in types.

use std::collections::BTreeMap;

use gpttrainer_domain::{Result, TrainerError};

/// Placeholder every analysis template must contain
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Stock templates, keyed by content type
const DEFAULT_PROMPTS: [(&str, &str); 4] = [
    ("document", "Analyze this document: {content}"),
    ("video", "Describe this video content: {content}"),
    ("presentation", "Summarize this presentation: {content}"),
    ("audio", "Transcribe and analyze this audio: {content}"),
];

/// Check that a template carries the `{content}` placeholder.
///
/// # Errors
///
/// Returns [`TrainerError::Validation`] when the placeholder is missing.
pub fn validate_template(template: &str) -> Result<()> {
    if template.contains(CONTENT_PLACEHOLDER) {
        return Ok(());
    }
    Err(TrainerError::Validation(format!(
        "prompt template must contain the {CONTENT_PLACEHOLDER} placeholder"
    )))
}

/// Substitute the placeholder with actual content.
pub fn render(template: &str, content: &str) -> String {
    template.replace(CONTENT_PLACEHOLDER, content)
}

/// Prompt templates keyed by content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLibrary {
    prompts: BTreeMap<String, String>,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            prompts: DEFAULT_PROMPTS
                .iter()
                .map(|(kind, template)| ((*kind).to_string(), (*template).to_string()))
                .collect(),
        }
    }
}

impl PromptLibrary {
    /// Library with no templates at all.
    pub fn empty() -> Self {
        Self { prompts: BTreeMap::new() }
    }

    /// Template for a content type, if one is registered.
    pub fn get(&self, content_type: &str) -> Option<&str> {
        self.prompts.get(content_type).map(String::as_str)
    }

    /// Template for a content type, falling back to a generic analysis
    /// prompt for unknown types.
    pub fn get_or_default(&self, content_type: &str) -> String {
        self.get(content_type)
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("Analyze this {content_type} content: {CONTENT_PLACEHOLDER}"))
    }

    /// Register or replace a template.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::Validation`] if the template lacks the
    /// placeholder.
    pub fn set(&mut self, content_type: impl Into<String>, template: impl Into<String>) -> Result<()> {
        let template = template.into();
        validate_template(&template)?;
        self.prompts.insert(content_type.into(), template);
        Ok(())
    }

    /// Remove a template, returning it if it existed.
    pub fn remove(&mut self, content_type: &str) -> Option<String> {
        self.prompts.remove(content_type)
    }

    /// Registered content types, in sorted order.
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_prompts_cover_the_four_content_types() {
        let library = PromptLibrary::default();
        let types: Vec<&str> = library.content_types().collect();
        assert_eq!(types, vec!["audio", "document", "presentation", "video"]);
        assert_eq!(library.get("document"), Some("Analyze this document: {content}"));
    }

    #[test]
    fn unknown_content_type_falls_back_to_generic_prompt() {
        let library = PromptLibrary::default();
        let prompt = library.get_or_default("diagram");
        assert_eq!(prompt, "Analyze this diagram content: {content}");
        assert!(validate_template(&prompt).is_ok());
    }

    #[test]
    fn templates_without_placeholder_are_rejected() {
        let mut library = PromptLibrary::default();
        let result = library.set("document", "Summarize it.");
        assert!(matches!(result, Err(TrainerError::Validation(_))));
        // The previous template survives a rejected update
        assert_eq!(library.get("document"), Some("Analyze this document: {content}"));
    }

    #[test]
    fn render_substitutes_the_placeholder() {
        assert_eq!(render("Analyze: {content}", "hello"), "Analyze: hello");
    }
}

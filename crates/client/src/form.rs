//! Create/edit form state.
//!
//! These limits are a convenience for the user. The server validates
//! independently and does not rely on them.

use prompt_curator_core::{
    CreatePromptInput, MAX_DESCRIPTION_CHARS, MAX_TAG_CHARS, MAX_TAGS, MAX_TEXT_CHARS, Prompt,
    PromptId, UpdatePromptInput, ValidationError,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag must not be empty")]
    Empty,
    #[error("tag must be {} characters or less", MAX_TAG_CHARS)]
    TooLong,
    #[error("tag '{0}' already exists")]
    Duplicate(String),
    #[error("maximum {} tags allowed", MAX_TAGS)]
    TooMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} must be {max} characters or less")]
pub struct FieldTooLong {
    pub field: &'static str,
    pub max: usize,
}

fn within(value: &str, field: &'static str, max: usize) -> Result<(), FieldTooLong> {
    if value.chars().count() > max {
        return Err(FieldTooLong { field, max });
    }
    Ok(())
}

fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_owned())
}

/// Form contents for creating or editing a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDraft {
    text: String,
    description: String,
    image_url: String,
    tags: Vec<String>,
}

impl PromptDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the edit form from an existing record.
    #[must_use]
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            text: prompt.text.clone(),
            description: prompt.description.clone().unwrap_or_default(),
            image_url: prompt.image_url.clone().unwrap_or_default(),
            tags: prompt.tags.clone(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Rejects text over the limit; the draft keeps its previous value.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), FieldTooLong> {
        let text = text.into();
        within(&text, "text", MAX_TEXT_CHARS)?;
        self.text = text;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), FieldTooLong> {
        let description = description.into();
        within(&description, "description", MAX_DESCRIPTION_CHARS)?;
        self.description = description;
        Ok(())
    }

    pub fn set_image_url(&mut self, image_url: impl Into<String>) {
        self.image_url = image_url.into();
    }

    /// Trims and lower-cases `raw`, then appends it. Returns the stored tag.
    pub fn add_tag(&mut self, raw: &str) -> Result<String, TagError> {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() {
            return Err(TagError::Empty);
        }
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(TagError::TooLong);
        }
        if self.tags.contains(&tag) {
            return Err(TagError::Duplicate(tag));
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(TagError::TooMany);
        }
        self.tags.push(tag.clone());
        Ok(tag)
    }

    /// Returns whether the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() < before
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Blank description and image URL are sent as `null`.
    pub fn to_create_input(&self) -> Result<CreatePromptInput, ValidationError> {
        Ok(CreatePromptInput::new(self.text.clone(), non_blank(&self.description))?
            .with_tags(self.tags.clone())
            .with_image_url(non_blank(&self.image_url)))
    }

    /// The edit form sends every field, so each one is `Set`.
    pub fn to_update_input(&self, id: PromptId) -> Result<UpdatePromptInput, ValidationError> {
        Ok(UpdatePromptInput::new(id)
            .with_text(self.text.clone())?
            .with_description(non_blank(&self.description))
            .with_image_url(non_blank(&self.image_url))
            .with_tags(self.tags.clone()))
    }
}

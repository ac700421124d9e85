//! Validated input contract for the persistence handlers.
//!
//! These types carry no serde derives: decoding from the wire happens in
//! [`crate::wire`], which converts into these types through `TryFrom`.

use chrono::{DateTime, Utc};

use crate::{Prompt, PromptId, ValidationError};

/// Three-way state of an optional field in an update.
///
/// `Unset` leaves the stored value untouched. For nullable columns the payload
/// is itself an `Option`, so `Set(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unset,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> FieldUpdate<T> {
    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    #[must_use]
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    pub fn into_set(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Overwrites `target` when set.
    pub fn apply_to(&self, target: &mut T)
    where
        T: Clone,
    {
        if let Self::Set(value) = self {
            target.clone_from(value);
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

fn require_text(text: String) -> Result<String, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty { field: "text" });
    }
    Ok(text)
}

/// Input for `createPrompt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePromptInput {
    text: String,
    description: Option<String>,
    image_url: Option<String>,
    tags: Vec<String>,
}

impl CreatePromptInput {
    /// Fails with [`ValidationError::Empty`] when `text` has no characters.
    pub fn new(
        text: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            text: require_text(text.into())?,
            description,
            image_url: None,
            tags: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_tags(self, tags: Vec<String>) -> Self {
        Self { tags, ..self }
    }

    /// Image URLs are stored as given; no syntax check is applied.
    #[must_use]
    pub fn with_image_url(self, image_url: Option<String>) -> Self {
        Self { image_url, ..self }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Builds the record a store would return for this input.
    #[must_use]
    pub fn into_prompt(self, id: PromptId, now: DateTime<Utc>) -> Prompt {
        Prompt {
            id,
            text: self.text,
            description: self.description,
            image_url: self.image_url,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for `updatePrompt`: `id` plus any subset of content fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePromptInput {
    id: PromptId,
    text: FieldUpdate<String>,
    description: FieldUpdate<Option<String>>,
    image_url: FieldUpdate<Option<String>>,
    tags: FieldUpdate<Vec<String>>,
}

impl UpdatePromptInput {
    /// An update that only bumps `updated_at`.
    #[must_use]
    pub fn new(id: PromptId) -> Self {
        Self {
            id,
            text: FieldUpdate::Unset,
            description: FieldUpdate::Unset,
            image_url: FieldUpdate::Unset,
            tags: FieldUpdate::Unset,
        }
    }

    /// Fails with [`ValidationError::Empty`] when `text` has no characters.
    pub fn with_text(self, text: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self { text: FieldUpdate::Set(require_text(text.into())?), ..self })
    }

    /// `None` clears the description.
    #[must_use]
    pub fn with_description(self, description: Option<String>) -> Self {
        Self { description: FieldUpdate::Set(description), ..self }
    }

    /// `None` clears the image URL.
    #[must_use]
    pub fn with_image_url(self, image_url: Option<String>) -> Self {
        Self { image_url: FieldUpdate::Set(image_url), ..self }
    }

    #[must_use]
    pub fn with_tags(self, tags: Vec<String>) -> Self {
        Self { tags: FieldUpdate::Set(tags), ..self }
    }

    #[must_use]
    pub fn id(&self) -> PromptId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &FieldUpdate<String> {
        &self.text
    }

    #[must_use]
    pub fn description(&self) -> &FieldUpdate<Option<String>> {
        &self.description
    }

    #[must_use]
    pub fn image_url(&self) -> &FieldUpdate<Option<String>> {
        &self.image_url
    }

    #[must_use]
    pub fn tags(&self) -> &FieldUpdate<Vec<String>> {
        &self.tags
    }

    /// True when no content field is set; applying it only bumps `updated_at`.
    #[must_use]
    pub fn is_content_noop(&self) -> bool {
        !(self.text.is_set()
            || self.description.is_set()
            || self.image_url.is_set()
            || self.tags.is_set())
    }

    /// Applies the set fields to `prompt` and moves `updated_at` strictly forward.
    pub fn apply_to(&self, prompt: &mut Prompt, now: DateTime<Utc>) {
        self.text.apply_to(&mut prompt.text);
        self.description.apply_to(&mut prompt.description);
        self.image_url.apply_to(&mut prompt.image_url);
        self.tags.apply_to(&mut prompt.tags);
        prompt.updated_at = bumped_timestamp(prompt.updated_at, now);
    }
}

/// `now`, or one microsecond past `previous` when the clock has not advanced.
#[must_use]
pub fn bumped_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + chrono::Duration::microseconds(1);
    now.max(floor)
}

/// Input for `getPrompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPromptInput {
    pub id: PromptId,
}

/// Input for `deletePrompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePromptInput {
    pub id: PromptId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_prompt() -> Prompt {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap_or_default();
        Prompt {
            id: PromptId(7),
            text: "a lighthouse at dusk".to_owned(),
            description: Some("moody".to_owned()),
            image_url: Some("https://img.example/1.png".to_owned()),
            tags: vec!["sea".to_owned(), "night".to_owned()],
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn create_rejects_empty_text() {
        let err = CreatePromptInput::new("", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "text" });
    }

    #[test]
    fn create_accepts_whitespace_text() {
        // Trimming is a form concern; the schema only requires one character.
        assert!(CreatePromptInput::new(" ", None).is_ok());
    }

    #[test]
    fn create_defaults_tags_and_image() {
        let input = CreatePromptInput::new("Write a story", None).unwrap();
        assert!(input.tags().is_empty());
        assert_eq!(input.image_url(), None);
        assert_eq!(input.description(), None);
    }

    #[test]
    fn update_rejects_empty_text() {
        assert!(UpdatePromptInput::new(PromptId(1)).with_text("").is_err());
    }

    #[test]
    fn noop_update_only_moves_updated_at() {
        let mut prompt = sample_prompt();
        let before = prompt.clone();
        let update = UpdatePromptInput::new(prompt.id);
        assert!(update.is_content_noop());

        update.apply_to(&mut prompt, before.updated_at);

        assert!(prompt.updated_at > before.updated_at);
        assert_eq!(prompt.text, before.text);
        assert_eq!(prompt.description, before.description);
        assert_eq!(prompt.image_url, before.image_url);
        assert_eq!(prompt.tags, before.tags);
        assert_eq!(prompt.created_at, before.created_at);
    }

    #[test]
    fn null_description_clears_but_keeps_other_fields() {
        let mut prompt = sample_prompt();
        let update = UpdatePromptInput::new(prompt.id).with_description(None);

        update.apply_to(&mut prompt, Utc::now());

        assert_eq!(prompt.description, None);
        assert_eq!(prompt.text, "a lighthouse at dusk");
        assert_eq!(prompt.tags, vec!["sea", "night"]);
        assert!(prompt.image_url.is_some());
    }

    #[test]
    fn field_update_from_option() {
        assert_eq!(FieldUpdate::<u8>::from(None), FieldUpdate::Unset);
        assert_eq!(FieldUpdate::from(Some(3_u8)), FieldUpdate::Set(3));
        assert_eq!(FieldUpdate::Set(Some(1_u8)).into_set(), Some(Some(1)));
    }

    #[test]
    fn bumped_timestamp_prefers_later_clock() {
        let prev = sample_prompt().updated_at;
        let later = prev + chrono::Duration::seconds(5);
        assert_eq!(bumped_timestamp(prev, later), later);
        assert_eq!(bumped_timestamp(later, prev), later + chrono::Duration::microseconds(1));
    }
}

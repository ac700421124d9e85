//! A single prompt card and its transient UI state.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use prompt_curator_core::{Prompt, PromptId};

/// How long the "copied" confirmation stays visible.
pub const COPY_FLASH: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Loading,
    Loaded,
    Failed,
}

/// What the user asked a card to do. The controller carries it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Copy(String),
    Edit(PromptId),
    Delete(PromptId),
}

/// One prompt as displayed in the list, plus transient UI state that is
/// never persisted.
#[derive(Debug, Clone)]
pub struct PromptCard {
    prompt: Prompt,
    image: Option<ImageStatus>,
    copied_at: Option<Instant>,
    confirming_delete: bool,
}

impl PromptCard {
    #[must_use]
    pub fn new(prompt: Prompt) -> Self {
        let image = prompt.image_url.as_ref().map(|_| ImageStatus::Loading);
        Self { prompt, image, copied_at: None, confirming_delete: false }
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// `None` when the prompt has no image URL.
    #[must_use]
    pub fn image_status(&self) -> Option<ImageStatus> {
        self.image
    }

    pub fn image_loaded(&mut self) {
        if self.image.is_some() {
            self.image = Some(ImageStatus::Loaded);
        }
    }

    pub fn image_failed(&mut self) {
        if self.image.is_some() {
            self.image = Some(ImageStatus::Failed);
        }
    }

    pub fn copy(&mut self, now: Instant) -> CardAction {
        self.copied_at = Some(now);
        CardAction::Copy(self.prompt.text.clone())
    }

    #[must_use]
    pub fn copy_flash_visible(&self, now: Instant) -> bool {
        self.copied_at.is_some_and(|at| now.saturating_duration_since(at) < COPY_FLASH)
    }

    #[must_use]
    pub fn edit(&self) -> CardAction {
        CardAction::Edit(self.prompt.id)
    }

    /// First step of delete: asks for confirmation.
    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    #[must_use]
    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    /// `Some(Delete)` only after [`Self::request_delete`].
    pub fn confirm_delete(&mut self) -> Option<CardAction> {
        if !std::mem::take(&mut self.confirming_delete) {
            return None;
        }
        Some(CardAction::Delete(self.prompt.id))
    }

    /// Plain-text rendering for terminal output.
    #[must_use]
    pub fn render(&self) -> String {
        let p = &self.prompt;
        let mut out = format!("#{}  {}\n", p.id, p.text);
        if let Some(description) = &p.description {
            let _ = writeln!(out, "    {description}");
        }
        if !p.tags.is_empty() {
            let tags: Vec<String> = p.tags.iter().map(|t| format!("#{t}")).collect();
            let _ = writeln!(out, "    {}", tags.join(" "));
        }
        if let Some(url) = &p.image_url {
            let suffix = match self.image {
                Some(ImageStatus::Failed) => " (failed to load)",
                _ => "",
            };
            let _ = writeln!(out, "    image: {url}{suffix}");
        }
        let _ = write!(out, "    created: {}", p.created_at.format("%Y-%m-%d"));
        if p.updated_at != p.created_at {
            let _ = write!(out, "  updated: {}", p.updated_at.format("%Y-%m-%d"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Prompt {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Prompt {
            id: PromptId(7),
            text: "A lighthouse at dusk".to_owned(),
            description: Some("moody".to_owned()),
            image_url: Some("https://img.example/l.png".to_owned()),
            tags: vec!["sea".to_owned(), "night".to_owned()],
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut card = PromptCard::new(sample());
        assert_eq!(card.confirm_delete(), None);

        card.request_delete();
        assert!(card.is_confirming_delete());
        assert_eq!(card.confirm_delete(), Some(CardAction::Delete(PromptId(7))));
        assert!(!card.is_confirming_delete());
        assert_eq!(card.confirm_delete(), None);
    }

    #[test]
    fn cancelled_delete_produces_nothing() {
        let mut card = PromptCard::new(sample());
        card.request_delete();
        card.cancel_delete();
        assert_eq!(card.confirm_delete(), None);
    }

    #[test]
    fn copy_flash_expires() {
        let mut card = PromptCard::new(sample());
        let now = Instant::now();
        assert!(!card.copy_flash_visible(now));
        assert_eq!(card.copy(now), CardAction::Copy("A lighthouse at dusk".to_owned()));
        assert!(card.copy_flash_visible(now + Duration::from_secs(1)));
        assert!(!card.copy_flash_visible(now + COPY_FLASH));
    }

    #[test]
    fn image_status_transitions() {
        let mut card = PromptCard::new(sample());
        assert_eq!(card.image_status(), Some(ImageStatus::Loading));
        card.image_failed();
        assert_eq!(card.image_status(), Some(ImageStatus::Failed));
        assert!(card.render().contains("(failed to load)"));

        let mut bare = sample();
        bare.image_url = None;
        let mut card = PromptCard::new(bare);
        card.image_loaded();
        assert_eq!(card.image_status(), None);
    }

    #[test]
    fn render_shows_fields() {
        let card = PromptCard::new(sample());
        let text = card.render();
        assert!(text.starts_with("#7  A lighthouse at dusk\n"));
        assert!(text.contains("#sea #night"));
        assert!(text.contains("image: https://img.example/l.png\n"));
        assert!(text.ends_with("created: 2024-03-01"));
        assert_eq!(card.edit(), CardAction::Edit(PromptId(7)));
    }
}

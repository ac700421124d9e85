//! Prompt procedures on top of a [`PromptStore`].

use std::sync::Arc;

use prompt_curator_core::{
    CreatePromptInput, DeletePromptInput, GetPromptInput, Prompt, UpdatePromptInput,
};
use prompt_curator_storage::traits::PromptStore;

use crate::ServiceError;

/// The five persistence handlers. Each is one independent storage call;
/// failures are logged here and returned unchanged to the caller.
#[derive(Clone)]
pub struct PromptService {
    storage: Arc<dyn PromptStore>,
}

impl PromptService {
    #[must_use]
    pub fn new(storage: Arc<dyn PromptStore>) -> Self {
        Self { storage }
    }

    pub async fn create_prompt(&self, input: CreatePromptInput) -> Result<Prompt, ServiceError> {
        match self.storage.create_prompt(&input).await {
            Ok(prompt) => {
                tracing::info!(id = %prompt.id, tags = prompt.tags.len(), "prompt created");
                Ok(prompt)
            },
            Err(e) => {
                tracing::error!(error = %e, "prompt creation failed");
                Err(e.into())
            },
        }
    }

    /// `None` when no prompt has the requested id.
    pub async fn get_prompt(&self, input: GetPromptInput) -> Result<Option<Prompt>, ServiceError> {
        self.storage.get_prompt(input.id).await.map_err(|e| {
            tracing::error!(error = %e, id = %input.id, "get prompt failed");
            e.into()
        })
    }

    /// Every prompt in insertion order; `[]` for an empty table.
    pub async fn get_prompts(&self) -> Result<Vec<Prompt>, ServiceError> {
        self.storage.list_prompts().await.map_err(|e| {
            tracing::error!(error = %e, "failed to fetch prompts");
            e.into()
        })
    }

    /// `None` when no prompt has the requested id.
    pub async fn update_prompt(
        &self,
        input: UpdatePromptInput,
    ) -> Result<Option<Prompt>, ServiceError> {
        let id = input.id();
        match self.storage.update_prompt(&input).await {
            Ok(Some(prompt)) => {
                tracing::info!(%id, noop = input.is_content_noop(), "prompt updated");
                Ok(Some(prompt))
            },
            Ok(None) => {
                tracing::debug!(%id, "update target not found");
                Ok(None)
            },
            Err(e) => {
                tracing::error!(error = %e, %id, "prompt update failed");
                Err(e.into())
            },
        }
    }

    /// `true` iff a row was removed. Deleting a missing id returns `false`.
    pub async fn delete_prompt(&self, input: DeletePromptInput) -> Result<bool, ServiceError> {
        match self.storage.delete_prompt(input.id).await {
            Ok(deleted) => {
                tracing::info!(id = %input.id, deleted, "prompt delete");
                Ok(deleted)
            },
            Err(e) => {
                tracing::error!(error = %e, id = %input.id, "prompt deletion failed");
                Err(e.into())
            },
        }
    }
}

//! Storage backend trait abstraction
//!
//! Defines the async prompt store implemented by every backend, enabling
//! PostgreSQL or SQLite via enum dispatch.

use async_trait::async_trait;
use prompt_curator_core::{CreatePromptInput, Prompt, PromptId, UpdatePromptInput};

use crate::error::StorageError;

/// CRUD operations on the `prompts` table.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Insert a prompt. The store assigns `id` and sets both timestamps to now.
    async fn create_prompt(&self, input: &CreatePromptInput) -> Result<Prompt, StorageError>;

    /// Get prompt by ID. `None` when no row has that ID.
    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, StorageError>;

    /// All prompts in insertion order.
    async fn list_prompts(&self) -> Result<Vec<Prompt>, StorageError>;

    /// Overwrite the set fields and bump `updated_at`. `None` when no row has that ID.
    async fn update_prompt(
        &self,
        input: &UpdatePromptInput,
    ) -> Result<Option<Prompt>, StorageError>;

    /// Delete prompt. Returns `true` if a row was deleted.
    async fn delete_prompt(&self, id: PromptId) -> Result<bool, StorageError>;
}

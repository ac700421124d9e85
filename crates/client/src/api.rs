//! The procedure set the client side programs against.

use async_trait::async_trait;
use prompt_curator_core::wire::HealthStatus;
use prompt_curator_core::{CreatePromptInput, Prompt, PromptId, UpdatePromptInput};

use crate::ClientError;

/// The remote procedures as seen from the client.
///
/// Absent targets are `None`/`false`, never errors.
#[async_trait]
pub trait PromptApi: Send + Sync {
    async fn healthcheck(&self) -> Result<HealthStatus, ClientError>;

    async fn create_prompt(&self, input: &CreatePromptInput) -> Result<Prompt, ClientError>;

    async fn get_prompts(&self) -> Result<Vec<Prompt>, ClientError>;

    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, ClientError>;

    async fn update_prompt(
        &self,
        input: &UpdatePromptInput,
    ) -> Result<Option<Prompt>, ClientError>;

    async fn delete_prompt(&self, id: PromptId) -> Result<bool, ClientError>;
}

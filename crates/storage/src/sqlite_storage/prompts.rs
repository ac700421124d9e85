//! PromptStore implementation for SqliteStorage.

use super::*;

use crate::traits::PromptStore;
use async_trait::async_trait;
use chrono::Utc;
use prompt_curator_core::{CreatePromptInput, UpdatePromptInput};

#[async_trait]
impl PromptStore for SqliteStorage {
    async fn create_prompt(&self, input: &CreatePromptInput) -> Result<Prompt, StorageError> {
        let now = Utc::now().timestamp_micros();
        let row = sqlx::query(&format!(
            "INSERT INTO prompts (text, description, image_url, tags, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?5)
               RETURNING {PROMPT_COLUMNS}"
        ))
        .bind(input.text())
        .bind(input.description())
        .bind(input.image_url())
        .bind(serde_json::to_string(input.tags())?)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        row_to_prompt(&row)
    }

    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, StorageError> {
        let row = sqlx::query(&format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = ?1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_prompt).transpose()
    }

    async fn list_prompts(&self) -> Result<Vec<Prompt>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {PROMPT_COLUMNS} FROM prompts ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_prompt).collect()
    }

    async fn update_prompt(
        &self,
        input: &UpdatePromptInput,
    ) -> Result<Option<Prompt>, StorageError> {
        let tags = input.tags().as_set().map(|t| serde_json::to_string(t)).transpose()?;
        let now = Utc::now().timestamp_micros();
        let row = sqlx::query(&format!(
            "UPDATE prompts SET
                 text = CASE WHEN ?1 THEN ?2 ELSE text END,
                 description = CASE WHEN ?3 THEN ?4 ELSE description END,
                 image_url = CASE WHEN ?5 THEN ?6 ELSE image_url END,
                 tags = CASE WHEN ?7 THEN ?8 ELSE tags END,
                 updated_at = MAX(?9, updated_at + 1)
               WHERE id = ?10
               RETURNING {PROMPT_COLUMNS}"
        ))
        .bind(input.text().is_set())
        .bind(input.text().as_set().map(String::as_str))
        .bind(input.description().is_set())
        .bind(input.description().as_set().and_then(|d| d.as_deref()))
        .bind(input.image_url().is_set())
        .bind(input.image_url().as_set().and_then(|u| u.as_deref()))
        .bind(input.tags().is_set())
        .bind(tags)
        .bind(now)
        .bind(input.id().0)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_prompt).transpose()
    }

    async fn delete_prompt(&self, id: PromptId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

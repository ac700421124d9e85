//! PostgreSQL storage backend using sqlx.

mod prompts;

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use prompt_curator_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, Prompt,
    PromptId,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) const PROMPT_COLUMNS: &str =
    "id, text, description, image_url, tags, created_at, updated_at";

pub(crate) fn row_to_prompt(row: &sqlx::postgres::PgRow) -> Result<Prompt, StorageError> {
    let id: i64 = row.try_get("id")?;
    let tags: serde_json::Value = row.try_get("tags")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Prompt {
        id: PromptId(id),
        text: row.try_get("text")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        tags: crate::codec::tags_from_value(id, tags)?,
        created_at,
        updated_at,
    })
}

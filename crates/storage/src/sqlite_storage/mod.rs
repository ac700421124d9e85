//! SQLite storage backend using sqlx.
//!
//! Timestamps are stored as INTEGER microseconds since the Unix epoch so the
//! `updated_at` bump can be computed inside a single UPDATE statement.

mod prompts;

use std::str::FromStr;

use crate::error::StorageError;
use prompt_curator_core::{Prompt, PromptId, SQLITE_POOL_MAX_CONNECTIONS};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use super::sqlite_migrations::run_sqlite_migrations;

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens (creating if missing) the database at `database_url`,
    /// e.g. `sqlite:///var/lib/prompts.db` or `sqlite::memory:`.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let in_memory = is_in_memory(database_url);
        let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Each connection to `:memory:` is a separate database, so pin exactly one.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(SQLITE_POOL_MAX_CONNECTIONS)
        };
        let pool = pool_options.connect_with(options).await?;

        run_sqlite_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(in_memory, "SqliteStorage initialized");
        Ok(Self { pool })
    }

    /// Private, empty database that lives as long as this storage.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::new("sqlite::memory:").await
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

pub(crate) const PROMPT_COLUMNS: &str =
    "id, text, description, image_url, tags, created_at, updated_at";

pub(crate) fn row_to_prompt(row: &SqliteRow) -> Result<Prompt, StorageError> {
    let id: i64 = row.try_get("id")?;
    let tags: String = row.try_get("tags")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;
    Ok(Prompt {
        id: PromptId(id),
        text: row.try_get("text")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        tags: crate::codec::tags_from_json(id, &tags)?,
        created_at: crate::codec::timestamp_from_micros(id, "created_at", created_at)?,
        updated_at: crate::codec::timestamp_from_micros(id, "updated_at", updated_at)?,
    })
}

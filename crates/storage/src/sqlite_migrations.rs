//! SQLite schema migrations for prompt-curator storage.

use sqlx::SqlitePool;

/// Current time as INTEGER microseconds since the Unix epoch.
const NOW_MICROS: &str = "(CAST((julianday('now') - 2440587.5) * 86400000000 AS INTEGER))";

/// Run all SQLite migrations. Every statement is idempotent.
pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // AUTOINCREMENT keeps ids of deleted rows from being handed out again.
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS prompts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            description TEXT,
            image_url TEXT,
            tags TEXT NOT NULL DEFAULT '[]' CHECK (json_type(tags) = 'array'),
            created_at INTEGER NOT NULL DEFAULT {NOW_MICROS},
            updated_at INTEGER NOT NULL DEFAULT {NOW_MICROS},
            CHECK (updated_at >= created_at)
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_prompts_created ON prompts (created_at DESC)")
        .execute(pool)
        .await?;

    tracing::debug!("SQLite migrations applied");
    Ok(())
}

//! PostgreSQL schema migrations for prompt-curator storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS prompts (
            id BIGSERIAL PRIMARY KEY,
            text TEXT NOT NULL,
            description TEXT,
            image_url TEXT,
            tags JSONB NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT prompts_tags_is_array CHECK (jsonb_typeof(tags) = 'array'),
            CONSTRAINT prompts_updated_after_created CHECK (updated_at >= created_at)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Tables created before image support lack the column.
    sqlx::query("ALTER TABLE prompts ADD COLUMN IF NOT EXISTS image_url TEXT")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_prompts_created ON prompts (created_at DESC)")
        .execute(pool)
        .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}

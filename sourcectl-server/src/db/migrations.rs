//! Schema migrations for sources and global selectors
//!
//! Every statement is idempotent, so this runs on each server start.

use sqlx::PgPool;

use super::DbError;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sources (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            article_index TEXT NOT NULL,
            page_index TEXT NOT NULL DEFAULT '',
            rate_limit TEXT NOT NULL DEFAULT '',
            max_depth INTEGER NOT NULL DEFAULT 0,
            time JSONB NOT NULL DEFAULT '[]',
            selectors JSONB NOT NULL DEFAULT '{}',
            city_name TEXT,
            group_id TEXT,
            enabled BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Singleton: the CHECK pins the only allowed key
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS global_selectors (
            id SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
            selectors JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sources_name ON sources(name)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sources_cities ON sources(city_name) \
         WHERE enabled = true AND city_name IS NOT NULL",
    )
    .execute(pool)
    .await?;

    Ok(())
}

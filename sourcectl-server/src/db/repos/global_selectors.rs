//! Global selectors repository
//!
//! The table holds at most one row, keyed by `GLOBAL_SELECTORS_ID` and
//! pinned there by a CHECK constraint. Create relies on the primary key
//! (ON CONFLICT DO NOTHING) instead of check-then-insert, so concurrent
//! initializations cannot produce a second row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::db::store::{DbError, GlobalSelectorsStore};
use crate::models::{GlobalSelectors, SelectorConfig, GLOBAL_SELECTORS_ID};

#[derive(Debug, Clone, FromRow)]
struct GlobalSelectorsRow {
    id: i16,
    selectors: Json<SelectorConfig>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GlobalSelectorsRow> for GlobalSelectors {
    fn from(r: GlobalSelectorsRow) -> Self {
        Self {
            id: r.id,
            selectors: r.selectors.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Postgres-backed global selectors repository
#[derive(Clone)]
pub struct PgGlobalSelectorsRepo {
    pool: PgPool,
}

impl PgGlobalSelectorsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GlobalSelectorsStore for PgGlobalSelectorsRepo {
    async fn get(&self) -> Result<GlobalSelectors, DbError> {
        let row: GlobalSelectorsRow = sqlx::query_as(
            "SELECT id, selectors, created_at, updated_at FROM global_selectors WHERE id = $1",
        )
        .bind(GLOBAL_SELECTORS_ID)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(DbError::global_selectors_not_found)?;

        Ok(row.into())
    }

    async fn update(&self, selectors: SelectorConfig) -> Result<GlobalSelectors, DbError> {
        let row: GlobalSelectorsRow = sqlx::query_as(
            r#"
            UPDATE global_selectors
            SET selectors = $2,
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING id, selectors, created_at, updated_at
            "#,
        )
        .bind(GLOBAL_SELECTORS_ID)
        .bind(Json(&selectors))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(DbError::global_selectors_not_found)?;

        Ok(row.into())
    }

    async fn create(&self, selectors: SelectorConfig) -> Result<GlobalSelectors, DbError> {
        let row: GlobalSelectorsRow = sqlx::query_as(
            r#"
            INSERT INTO global_selectors (id, selectors, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (id) DO NOTHING
            RETURNING id, selectors, created_at, updated_at
            "#,
        )
        .bind(GLOBAL_SELECTORS_ID)
        .bind(Json(&selectors))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::Conflict {
            resource: "global selectors",
        })?;

        tracing::info!("global selectors initialized");
        Ok(row.into())
    }
}

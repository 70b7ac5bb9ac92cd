//! Source repository
//!
//! Handles source CRUD with:
//! - `time` and `selectors` stored as JSONB through `sqlx::types::Json`
//! - zero affected rows mapped to `DbError::NotFound`
//! - `updated_at` bumped past its previous value on every update

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::db::store::{DbError, SourceStore};
use crate::models::{City, SelectorConfig, Source, SourceInput};

const SOURCE_COLUMNS: &str = "id, name, url, article_index, page_index, rate_limit, max_depth, \
     time, selectors, city_name, group_id, enabled, created_at, updated_at";

/// Source record as stored
#[derive(Debug, Clone, FromRow)]
struct SourceRow {
    id: Uuid,
    name: String,
    url: String,
    article_index: String,
    page_index: String,
    rate_limit: String,
    max_depth: i32,
    time: Json<Vec<String>>,
    selectors: Json<SelectorConfig>,
    city_name: Option<String>,
    group_id: Option<String>,
    enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SourceRow> for Source {
    fn from(r: SourceRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            url: r.url,
            article_index: r.article_index,
            page_index: r.page_index,
            rate_limit: r.rate_limit,
            max_depth: r.max_depth,
            time: r.time.0,
            selectors: r.selectors.0,
            city_name: r.city_name,
            group_id: r.group_id,
            enabled: r.enabled,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Postgres-backed source repository
#[derive(Clone)]
pub struct PgSourceRepo {
    pool: PgPool,
}

impl PgSourceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SourceStore for PgSourceRepo {
    async fn create(&self, input: SourceInput) -> Result<Source, DbError> {
        let source = Source::from_input(input, Utc::now());

        let row: SourceRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO sources (
                id, name, url, article_index, page_index, rate_limit, max_depth,
                time, selectors, city_name, group_id, enabled, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {SOURCE_COLUMNS}
            "#
        ))
        .bind(source.id)
        .bind(&source.name)
        .bind(&source.url)
        .bind(&source.article_index)
        .bind(&source.page_index)
        .bind(&source.rate_limit)
        .bind(source.max_depth)
        .bind(Json(&source.time))
        .bind(Json(&source.selectors))
        .bind(source.city_name.as_deref())
        .bind(source.group_id.as_deref())
        .bind(source.enabled)
        .bind(source.created_at)
        .bind(source.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, name = %row.name, "source inserted");
        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Source, DbError> {
        let row: SourceRow = sqlx::query_as(&format!(
            "SELECT {SOURCE_COLUMNS} FROM sources WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::source_not_found(id))?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Source>, DbError> {
        let rows: Vec<SourceRow> = sqlx::query_as(&format!(
            "SELECT {SOURCE_COLUMNS} FROM sources ORDER BY name COLLATE \"C\""
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Source::from).collect())
    }

    async fn update(&self, id: Uuid, input: SourceInput) -> Result<Source, DbError> {
        // GREATEST keeps updated_at strictly increasing even when two
        // updates land within the same clock tick.
        let row: SourceRow = sqlx::query_as(&format!(
            r#"
            UPDATE sources
            SET name = $2, url = $3, article_index = $4, page_index = $5,
                rate_limit = $6, max_depth = $7, time = $8, selectors = $9,
                city_name = $10, group_id = $11, enabled = $12,
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING {SOURCE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.article_index)
        .bind(&input.page_index)
        .bind(&input.rate_limit)
        .bind(input.max_depth)
        .bind(Json(&input.time))
        .bind(Json(&input.selectors))
        .bind(input.city_name.as_deref())
        .bind(input.group_id.as_deref())
        .bind(input.enabled)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::source_not_found(id))?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::source_not_found(id));
        }

        Ok(())
    }

    async fn cities(&self) -> Result<Vec<City>, DbError> {
        // The COALESCE fallback to name never fires under this filter; the
        // query is kept as the downstream consumer has always seen it.
        // Byte-order collation matches the in-memory store.
        let rows = sqlx::query(
            r#"
            SELECT
                COALESCE(city_name, name) AS city_name,
                article_index,
                COALESCE(group_id, '') AS group_id
            FROM sources
            WHERE enabled = true AND city_name IS NOT NULL
            ORDER BY city_name COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let cities = rows
            .into_iter()
            .map(|r| {
                let group_id: String = r.get("group_id");
                City {
                    name: r.get("city_name"),
                    index: r.get("article_index"),
                    group_id: (!group_id.is_empty()).then_some(group_id),
                }
            })
            .collect();

        Ok(cities)
    }
}

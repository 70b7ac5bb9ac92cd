//! Storage seams shared by the Postgres repositories and the in-memory store
//!
//! Handlers only see these traits, so the HTTP layer can run against
//! either backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{City, GlobalSelectors, SelectorConfig, Source, SourceInput};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("already exists: {resource}")]
    Conflict { resource: &'static str },
}

impl DbError {
    pub(crate) fn source_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "source",
            id: id.to_string(),
        }
    }

    pub(crate) fn global_selectors_not_found() -> Self {
        Self::NotFound {
            resource: "global selectors",
            id: crate::models::GLOBAL_SELECTORS_ID.to_string(),
        }
    }
}

/// CRUD over scraping sources plus the cities projection.
///
/// Every operation is a single statement; no call spans a transaction.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Insert a new source with a fresh id and timestamps.
    async fn create(&self, input: SourceInput) -> Result<Source, DbError>;

    /// Fetch one source.
    async fn get(&self, id: Uuid) -> Result<Source, DbError>;

    /// All sources ordered by name ascending.
    async fn list(&self) -> Result<Vec<Source>, DbError>;

    /// Replace every mutable field and advance `updated_at`.
    async fn update(&self, id: Uuid, input: SourceInput) -> Result<Source, DbError>;

    async fn delete(&self, id: Uuid) -> Result<(), DbError>;

    /// Enabled sources that carry a city name, ordered by that name.
    async fn cities(&self) -> Result<Vec<City>, DbError>;
}

/// The singleton global selectors row.
#[async_trait]
pub trait GlobalSelectorsStore: Send + Sync {
    async fn get(&self) -> Result<GlobalSelectors, DbError>;

    /// Replace the stored selectors; fails with `NotFound` before `create`.
    async fn update(&self, selectors: SelectorConfig) -> Result<GlobalSelectors, DbError>;

    /// One-time initialization; fails with `Conflict` if the row exists.
    async fn create(&self, selectors: SelectorConfig) -> Result<GlobalSelectors, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let id = Uuid::nil();
        assert_eq!(
            DbError::source_not_found(id).to_string(),
            "not found: source '00000000-0000-0000-0000-000000000000'"
        );
        assert_eq!(
            DbError::global_selectors_not_found().to_string(),
            "not found: global selectors '1'"
        );
    }
}

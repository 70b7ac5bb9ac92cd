//! In-memory store with the same semantics as the Postgres repositories
//!
//! Used by `sourcectl serve --in-memory` and by the router tests. Contents
//! are lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{DbError, GlobalSelectorsStore, SourceStore};
use crate::models::{
    City, GlobalSelectors, SelectorConfig, Source, SourceInput, GLOBAL_SELECTORS_ID,
};

/// Sources and global selectors held behind async locks
///
/// Names sort by byte order, the same as `COLLATE "C"` in the Postgres
/// queries, so both backends list mixed-case names identically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sources: RwLock<HashMap<Uuid, Source>>,
    global: RwLock<Option<GlobalSelectors>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Current time, nudged past `previous` so mutation timestamps always advance.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::microseconds(1))
}

#[async_trait]
impl SourceStore for MemoryStore {
    async fn create(&self, input: SourceInput) -> Result<Source, DbError> {
        let source = Source::from_input(input, Utc::now());
        self.sources.write().await.insert(source.id, source.clone());
        Ok(source)
    }

    async fn get(&self, id: Uuid) -> Result<Source, DbError> {
        self.sources
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::source_not_found(id))
    }

    async fn list(&self) -> Result<Vec<Source>, DbError> {
        let mut sources: Vec<Source> = self.sources.read().await.values().cloned().collect();
        sources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sources)
    }

    async fn update(&self, id: Uuid, input: SourceInput) -> Result<Source, DbError> {
        let mut sources = self.sources.write().await;
        let source = sources
            .get_mut(&id)
            .ok_or_else(|| DbError::source_not_found(id))?;

        source.apply(input);
        source.updated_at = next_timestamp(source.updated_at);
        Ok(source.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        self.sources
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::source_not_found(id))
    }

    async fn cities(&self) -> Result<Vec<City>, DbError> {
        let mut cities: Vec<City> = self
            .sources
            .read()
            .await
            .values()
            .filter(|s| s.enabled && s.city_name.is_some())
            .map(|s| City {
                name: s.city_name.clone().unwrap_or_else(|| s.name.clone()),
                index: s.article_index.clone(),
                group_id: s.group_id.clone().filter(|g| !g.is_empty()),
            })
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }
}

#[async_trait]
impl GlobalSelectorsStore for MemoryStore {
    async fn get(&self) -> Result<GlobalSelectors, DbError> {
        self.global
            .read()
            .await
            .clone()
            .ok_or_else(DbError::global_selectors_not_found)
    }

    async fn update(&self, selectors: SelectorConfig) -> Result<GlobalSelectors, DbError> {
        let mut global = self.global.write().await;
        let row = global
            .as_mut()
            .ok_or_else(DbError::global_selectors_not_found)?;

        row.selectors = selectors;
        row.updated_at = next_timestamp(row.updated_at);
        Ok(row.clone())
    }

    async fn create(&self, selectors: SelectorConfig) -> Result<GlobalSelectors, DbError> {
        let mut global = self.global.write().await;
        if global.is_some() {
            return Err(DbError::Conflict {
                resource: "global selectors",
            });
        }

        let now = Utc::now();
        let row = GlobalSelectors {
            id: GLOBAL_SELECTORS_ID,
            selectors,
            created_at: now,
            updated_at: now,
        };
        *global = Some(row.clone());
        Ok(row)
    }
}

//! Command implementations for sourcectl CLI

pub mod global;
pub mod migrate;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use global::run_global;
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use sourcectl_server::db::{create_pool_with_options, migrations, PgPool};

use crate::config::SourcectlConfig;

/// The flag/env value wins over the config file.
pub(crate) fn resolve_database_url(
    flag: Option<String>,
    config: &SourcectlConfig,
) -> Result<String> {
    flag.or_else(|| config.database.url.clone()).context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, ~/.sourcectl/.env, \
         or [database] url in the config file",
    )
}

/// Connect to Postgres and bring the schema up to date.
pub(crate) async fn connect(database_url: &str, config: &SourcectlConfig) -> Result<PgPool> {
    let pool = create_pool_with_options(
        database_url,
        config.max_connections(),
        config.acquire_timeout(),
    )
    .await
    .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

//! Schema migration command

use anyhow::Result;
use clap::Parser;

use super::{connect, resolve_database_url};
use crate::config::SourcectlConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create or update the schema; safe to run repeatedly.
pub async fn run_migrate(args: MigrateArgs, config: &SourcectlConfig) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, config)?;
    connect(&database_url, config).await?;

    println!("Schema is up to date");
    Ok(())
}

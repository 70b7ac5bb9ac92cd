//! Global selectors commands
//!
//! Seeds or prints the single global selectors record directly against
//! the database, without a running server.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sourcectl_server::db::{DbError, GlobalSelectorsStore, PgGlobalSelectorsRepo};
use sourcectl_server::models::SelectorConfig;

use super::{connect, resolve_database_url};
use crate::config::SourcectlConfig;

#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: GlobalCommands,
}

#[derive(Subcommand, Debug)]
pub enum GlobalCommands {
    /// Create the global selectors record from a JSON file (fails if it exists)
    Init {
        /// JSON file with `article`, `list`, and `page` selector groups
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    /// Print the global selectors record as JSON
    Show,
}

pub async fn run_global(args: GlobalArgs, config: &SourcectlConfig) -> Result<()> {
    // Parse the file before touching the database
    let selectors = match &args.command {
        GlobalCommands::Init { file } => Some(read_selectors(file)?),
        GlobalCommands::Show => None,
    };

    let database_url = resolve_database_url(args.database_url, config)?;
    let repo = PgGlobalSelectorsRepo::new(connect(&database_url, config).await?);

    match selectors {
        Some(selectors) => {
            let created = match repo.create(selectors).await {
                Ok(created) => created,
                Err(DbError::Conflict { .. }) => anyhow::bail!(
                    "Global selectors already exist; update them with PUT /api/v1/global-selectors"
                ),
                Err(e) => return Err(e).context("Failed to create global selectors"),
            };
            tracing::info!(updated_at = %created.updated_at, "global selectors created");
            println!("Global selectors created");
        }
        None => {
            let current = match repo.get().await {
                Ok(current) => current,
                Err(DbError::NotFound { .. }) => anyhow::bail!(
                    "Global selectors not initialized; run `sourcectl global init --file PATH`"
                ),
                Err(e) => return Err(e).context("Failed to load global selectors"),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&current).context("Failed to render JSON")?
            );
        }
    }

    Ok(())
}

fn read_selectors(path: &Path) -> Result<SelectorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid selector JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_partial_selector_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("global.json");
        std::fs::write(&path, r#"{"article": {"title": "h1", "exclude": [".ad"]}}"#).unwrap();

        let selectors = read_selectors(&path).unwrap();
        assert_eq!(selectors.article.title, "h1");
        assert_eq!(selectors.article.exclude, vec![".ad".to_string()]);
        assert!(selectors.list.container.is_empty());
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("global.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_selectors(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid selector JSON"));
    }
}

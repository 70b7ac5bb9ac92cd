//! Configuration file, `.env` loading, and the `config` subcommand
//!
//! The file lives at `~/.sourcectl/config.toml` (override with
//! `--config` or `SOURCECTL_CONFIG`). Every key is optional; flags and
//! environment variables take precedence over it.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use sourcectl_server::db::pool::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use sourcectl_server::http::server::DEFAULT_REQUEST_TIMEOUT;

/// Resolved configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcectlConfig {
    pub log_level: Option<String>,
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

impl SourcectlConfig {
    /// Default config file path: ~/.sourcectl/config.toml
    pub fn default_path() -> PathBuf {
        home_dir().join(".sourcectl/config.toml")
    }

    /// Load from `path` (or the default path). A missing file yields the
    /// defaults; an unreadable or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        self.server
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn max_connections(&self) -> u32 {
        self.database.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.database
            .acquire_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Load `.env` files: ~/.sourcectl/.env first, then the working directory.
///
/// dotenvy never overwrites variables that are already set, so the real
/// environment always wins.
pub fn load_dotenv() {
    let _ = dotenvy::from_path(home_dir().join(".sourcectl/.env"));
    let _ = dotenvy::dotenv();
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the loaded configuration as TOML
    Show,
    /// Write a commented config template
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: Option<&Path>) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(SourcectlConfig::default_path);

    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = SourcectlConfig::load(Some(&path))?;
            print!("{}", toml::to_string_pretty(&config).context("Failed to render config")?);
            Ok(())
        }
        ConfigCommands::Init(args) => run_init(&path, args),
    }
}

fn run_init(path: &Path, args: InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(path, include_str!("../config.template.toml"))
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created config at: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SourcectlConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, SourcectlConfig::default());
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.max_connections(), DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn template_parses() {
        let config: SourcectlConfig = toml::from_str(include_str!("../config.template.toml")).unwrap();
        assert_eq!(config.server.bind, Some("127.0.0.1:8050".parse().unwrap()));
        assert_eq!(config.database.max_connections, Some(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database]\nurl = \"postgres://db/sources\"\n").unwrap();

        let config = SourcectlConfig::load(Some(&path)).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://db/sources"));
        assert_eq!(config.server, ServerSection::default());
        assert_eq!(config.acquire_timeout(), DEFAULT_ACQUIRE_TIMEOUT);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = ").unwrap();

        let err = SourcectlConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        run_init(&path, InitArgs { force: false }).unwrap();
        assert!(path.exists());

        assert!(run_init(&path, InitArgs { force: false }).is_err());
        run_init(&path, InitArgs { force: true }).unwrap();
    }
}

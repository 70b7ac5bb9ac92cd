//! HTTP server command
//!
//! Runs the sources API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use sourcectl_server::http::{run_server, AppState, ServerConfig};

use super::{connect, resolve_database_url};
use crate::config::SourcectlConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8050)
    #[arg(long, short = 'b', env = "SOURCECTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Per-request deadline in seconds
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Keep everything in process memory instead of Postgres (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn server_config(&self, config: &SourcectlConfig) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            bind_addr: self.bind.or(config.server.bind).unwrap_or(defaults.bind_addr),
            cors_permissive: self.cors_permissive
                || config.server.cors_permissive.unwrap_or(false),
            request_timeout: self
                .request_timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.request_timeout()),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &SourcectlConfig) -> Result<()> {
    let server_config = args.server_config(config);

    let state = if args.in_memory {
        tracing::warn!("Using in-memory storage; data will not survive a restart");
        AppState::in_memory()
    } else {
        let database_url = resolve_database_url(args.database_url, config)?;

        let mut config = config.clone();
        if let Some(max) = args.max_connections {
            config.database.max_connections = Some(max);
        }

        let pool = connect(&database_url, &config).await?;
        AppState::postgres(pool)
    };

    tracing::info!("Starting sourcectl server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["serve"];
        full.extend_from_slice(argv);
        ServeArgs::parse_from(full)
    }

    #[test]
    fn flags_override_config_file() {
        let mut config = SourcectlConfig::default();
        config.server.bind = Some("0.0.0.0:9000".parse().unwrap());
        config.server.request_timeout_secs = Some(10);

        let resolved = args(&["--bind", "127.0.0.1:7000", "--request-timeout", "3"]).server_config(&config);
        assert_eq!(resolved.bind_addr, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(resolved.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn config_file_fills_missing_flags() {
        let mut config = SourcectlConfig::default();
        config.server.bind = Some("0.0.0.0:9000".parse().unwrap());
        config.server.cors_permissive = Some(true);

        let resolved = args(&[]).server_config(&config);
        assert_eq!(resolved.bind_addr.port(), 9000);
        assert!(resolved.cors_permissive);
    }
}

//! sourcectl - storage service for crawler source configurations
//!
//! Entry point for the `sourcectl` command-line tool:
//! - HTTP API for sources, global selectors, and derived cities (`serve`)
//! - Schema creation (`migrate`)
//! - Global selectors seeding and inspection (`global`)
//! - Configuration file management (`config`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::SourcectlConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "sourcectl",
    author,
    version,
    about = "HTTP service that stores crawler source configurations",
    long_about = "Stores per-site crawler source configurations and one global selector \
                  configuration in Postgres, and serves them over a JSON HTTP API."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ~/.sourcectl/config.toml)
    #[arg(long, env = "SOURCECTL_CONFIG", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Manage the global selectors record (init, show)
    Global(commands::global::GlobalArgs),
    /// Manage sourcectl configuration (path, show, init)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    config::load_dotenv();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        // `config` works on the file itself, so a broken file must not block it
        Commands::Config(args) => config::run_config(args, config_path)?,
        Commands::Serve(args) => {
            let cfg = setup(cli.debug, config_path)?;
            commands::run_serve(args, &cfg).await?
        }
        Commands::Migrate(args) => {
            let cfg = setup(cli.debug, config_path)?;
            commands::run_migrate(args, &cfg).await?
        }
        Commands::Global(args) => {
            let cfg = setup(cli.debug, config_path)?;
            commands::run_global(args, &cfg).await?
        }
    }
    Ok(())
}

/// Load the config file and start logging with its level.
fn setup(debug: bool, config_path: Option<&std::path::Path>) -> Result<SourcectlConfig> {
    let cfg = SourcectlConfig::load(config_path)?;

    tracing_setup::init(&TracingConfig {
        debug,
        log_level: cfg.log_level.clone(),
    })
    .ok();

    Ok(cfg)
}

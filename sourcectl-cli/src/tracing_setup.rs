//! Tracing setup for the sourcectl CLI
//!
//! Usage:
//!   sourcectl --debug serve                    # Debug logging to console
//!   RUST_LOG=sourcectl_server=debug sourcectl  # Fine-grained log control
//!
//! Filter precedence: RUST_LOG, then --debug, then `log_level` from the
//! config file, then "info".

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used when RUST_LOG is not set)
    pub debug: bool,
    /// Fallback filter from the config file
    pub log_level: Option<String>,
}

impl TracingConfig {
    fn fallback_filter(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.log_level.as_deref().unwrap_or("info")
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.fallback_filter()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_overrides_configured_level() {
        let config = TracingConfig {
            debug: true,
            log_level: Some("warn".into()),
        };
        assert_eq!(config.fallback_filter(), "debug");
    }

    #[test]
    fn configured_level_then_info() {
        let config = TracingConfig {
            debug: false,
            log_level: Some("warn".into()),
        };
        assert_eq!(config.fallback_filter(), "warn");
        assert_eq!(TracingConfig::default().fallback_filter(), "info");
    }
}

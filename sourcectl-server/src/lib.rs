//! sourcectl-server: HTTP service for crawler source configurations
//!
//! Stores scraping sources (target URL, nested CSS selectors, schedule,
//! rate limit) and the shared global selectors row, and serves the
//! derived cities listing consumed by the publisher.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, GlobalSelectorsStore, MemoryStore, SourceStore};
pub use http::{build_router, run_server, AppState, ServerConfig};

//! Route handlers organized by resource

pub mod health;
pub mod sources;
pub mod cities;
pub mod global_selectors;

use std::sync::Arc;

use axum::Router;

use super::server::AppState;

/// Versioned API routes, mounted under `/api/v1`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(sources::router())
        .merge(cities::router())
        .merge(global_selectors::router())
}

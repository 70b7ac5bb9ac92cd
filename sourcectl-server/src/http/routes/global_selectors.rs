//! Global selectors endpoints
//!
//! The configuration is a singleton: POST initializes it once, GET/PUT
//! read and replace it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{GlobalSelectors, SelectorConfig};

/// GET /global-selectors
async fn get_global_selectors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GlobalSelectors>, ApiError> {
    let global = state.global_selectors.get().await?;
    Ok(Json(global))
}

/// PUT /global-selectors - replace the shared configuration
async fn update_global_selectors(
    State(state): State<Arc<AppState>>,
    ValidJson(selectors): ValidJson<SelectorConfig>,
) -> Result<Json<GlobalSelectors>, ApiError> {
    let global = state.global_selectors.update(selectors).await?;

    tracing::info!("global selectors updated");
    Ok(Json(global))
}

/// POST /global-selectors - one-time initialization, 409 afterwards
async fn create_global_selectors(
    State(state): State<Arc<AppState>>,
    ValidJson(selectors): ValidJson<SelectorConfig>,
) -> Result<(StatusCode, Json<GlobalSelectors>), ApiError> {
    let global = state.global_selectors.create(selectors).await?;
    Ok((StatusCode::CREATED, Json(global)))
}

/// Global selectors routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/global-selectors",
        get(get_global_selectors)
            .put(update_global_selectors)
            .post(create_global_selectors),
    )
}

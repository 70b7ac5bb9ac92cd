//! Source endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{SourceId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Source, SourceInput};

/// POST /sources - create a source
async fn create_source(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<SourceInput>,
) -> Result<(StatusCode, Json<Source>), ApiError> {
    input.validate()?;
    let source = state.sources.create(input).await?;

    tracing::info!(id = %source.id, name = %source.name, "source created");
    Ok((StatusCode::CREATED, Json(source)))
}

/// GET /sources - list all sources ordered by name
async fn list_sources(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Source>>, ApiError> {
    let sources = state.sources.list().await?;
    Ok(Json(sources))
}

/// GET /sources/{id}
async fn get_source(
    State(state): State<Arc<AppState>>,
    SourceId(id): SourceId,
) -> Result<Json<Source>, ApiError> {
    let source = state.sources.get(id).await?;
    Ok(Json(source))
}

/// PUT /sources/{id} - replace every mutable field
async fn update_source(
    State(state): State<Arc<AppState>>,
    SourceId(id): SourceId,
    ValidJson(input): ValidJson<SourceInput>,
) -> Result<Json<Source>, ApiError> {
    input.validate()?;
    let source = state.sources.update(id, input).await?;

    tracing::info!(id = %source.id, "source updated");
    Ok(Json(source))
}

/// DELETE /sources/{id}
async fn delete_source(
    State(state): State<Arc<AppState>>,
    SourceId(id): SourceId,
) -> Result<StatusCode, ApiError> {
    state.sources.delete(id).await?;

    tracing::info!(%id, "source deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Source routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sources", get(list_sources).post(create_source))
        .route(
            "/sources/{id}",
            get(get_source).put(update_source).delete(delete_source),
        )
}

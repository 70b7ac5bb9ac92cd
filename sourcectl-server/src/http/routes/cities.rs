//! Cities endpoint for the downstream publisher

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::City;

/// GET /cities - enabled sources with a city name, ordered by city
async fn list_cities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<City>>, ApiError> {
    let cities = state.sources.cities().await?;
    Ok(Json(cities))
}

/// City routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/cities", get(list_cities))
}

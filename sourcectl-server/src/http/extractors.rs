//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body whose rejections (bad syntax, wrong shape, missing
/// content type) become a 400 with the standard error body.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::Body {
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}

/// Source id from the path.
///
/// Ids are UUIDs, so anything else cannot name a stored source and
/// resolves to 404 rather than 400.
pub struct SourceId(pub Uuid);

impl<S> FromRequestParts<S> for SourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A segment that does not even decode (e.g. invalid UTF-8) names no source either
        let Path(raw): Path<String> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::NotFound {
                    resource: "source",
                    id: parts.uri.path().rsplit('/').next().unwrap_or_default().to_owned(),
                })?;

        let id = Uuid::parse_str(&raw).map_err(|_| ApiError::NotFound {
            resource: "source",
            id: raw.clone(),
        })?;

        Ok(Self(id))
    }
}

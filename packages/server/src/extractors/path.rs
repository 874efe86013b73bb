use axum::{
    extract::{FromRequestParts, Path, rejection::PathRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Path<T>` wrapper that reports malformed path parameters (e.g. a
/// non-numeric movie id) as `AppError::Validation` with a JSON body.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| {
                AppError::Validation(format!("Movie ID is invalid: {}", e.body_text()))
            })?;
        Ok(AppPath(value))
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::domain::CatalogError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `INVALID_PATH`, `PAYLOAD_TOO_LARGE`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[serde(rename = "error")]
    #[schema(example = "Title must be 1-256 characters")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    InvalidPath(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::InvalidPath(path) => {
                tracing::warn!("Rejected image path: {}", path);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        code: "INVALID_PATH",
                        message: "Image path is outside the upload directory".into(),
                    },
                )
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    /// Map a failed update or delete. A movie that does not exist is reported
    /// like any other failed write, as an internal error.
    pub fn from_write(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => {
                AppError::Internal(format!("Write to movie {id} failed: no such record"))
            }
            other => other.into(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => AppError::Validation(msg),
            CatalogError::NotFound(id) => {
                AppError::NotFound(format!("Movie {id} does not exist"))
            }
            CatalogError::InvalidPath(path) => AppError::InvalidPath(path),
            CatalogError::TooLarge { limit, .. } => AppError::PayloadTooLarge(format!(
                "Image exceeds maximum size of {limit} bytes"
            )),
            CatalogError::Io(e) => AppError::Internal(format!("Image storage failed: {e}")),
            CatalogError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

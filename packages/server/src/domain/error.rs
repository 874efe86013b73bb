use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised by the movie repository and service.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Movie {0} does not exist")]
    NotFound(i32),

    #[error("Invalid image path: {0}")]
    InvalidPath(String),

    #[error("Image exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge { actual: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidPath(path) => CatalogError::InvalidPath(path),
            StorageError::Io(e) => CatalogError::Io(e),
            StorageError::SizeLimitExceeded { actual, limit } => {
                CatalogError::TooLarge { actual, limit }
            }
        }
    }
}

impl CatalogError {
    /// Translate a write failure on `id` into `NotFound` when the row is gone.
    pub(crate) fn from_write(id: i32, err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => CatalogError::NotFound(id),
            other => CatalogError::Storage(other),
        }
    }
}

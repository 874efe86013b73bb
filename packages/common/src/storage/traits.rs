use async_trait::async_trait;

use super::error::StorageError;
use crate::token::unique_image_filename;

/// Storage for movie cover images, addressed by their public image URL
/// (`<prefix>/<filename>`).
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Check whether `path` names a file directly inside the upload directory.
    fn is_contained(&self, path: &str) -> bool;

    /// Produce a fresh `img_<token><extension>` filename.
    fn generate_unique_filename(&self, extension: &str) -> String {
        unique_image_filename(extension)
    }

    /// Store bytes under a newly generated filename and return its image URL.
    async fn put(&self, extension: &str, data: &[u8]) -> Result<String, StorageError>;

    /// Delete the image behind `path`.
    ///
    /// Returns `true` if a file was removed, `false` if it was already gone.
    /// Paths outside the upload directory fail with
    /// [`StorageError::InvalidPath`] without touching the filesystem.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;
}

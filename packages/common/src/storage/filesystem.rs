use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::error::StorageError;
use super::path::{contained_filename, is_safe_extension};
use super::traits::ImageStore;

/// Filesystem-backed image store.
///
/// Images live flat in `base_path`; their public URL is
/// `{url_prefix}/{filename}`. Writes go through `{base_path}/.tmp` and are
/// renamed into place so a partially written image is never visible.
pub struct FilesystemImageStore {
    base_path: PathBuf,
    url_prefix: String,
    max_size: u64,
}

impl FilesystemImageStore {
    /// Create a new filesystem image store, creating the upload directory if needed.
    pub async fn new(
        base_path: PathBuf,
        url_prefix: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let url_prefix = url_prefix.trim_matches('/');
        if url_prefix.is_empty() {
            return Err(StorageError::InvalidPath(
                "upload URL prefix cannot be empty".into(),
            ));
        }

        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            url_prefix: url_prefix.to_string(),
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Map a contained image URL to its location on disk.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        contained_filename(&self.url_prefix, path).map(|name| self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    fn is_contained(&self, path: &str) -> bool {
        contained_filename(&self.url_prefix, path).is_some()
    }

    async fn put(&self, extension: &str, data: &[u8]) -> Result<String, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }
        if !is_safe_extension(extension) {
            return Err(StorageError::InvalidPath(format!(
                "unsupported extension: {extension:?}"
            )));
        }

        let filename = self.generate_unique_filename(extension);
        let target = self.base_path.join(&filename);

        let temp_path = self.temp_path();
        let written = async {
            let mut temp_file = fs::File::create(&temp_path).await?;
            temp_file.write_all(data).await?;
            temp_file.flush().await?;
            drop(temp_file);
            fs::rename(&temp_path, &target).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(file = %target.display(), size = data.len(), "Stored image");
        Ok(format!("{}/{}", self.url_prefix, filename))
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| StorageError::InvalidPath(path.to_string()))?;
        match fs::remove_file(&file).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

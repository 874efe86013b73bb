use std::sync::Arc;

use common::storage::ImageStore;
use tracing::{debug, instrument, warn};

use crate::domain::movie::{current_image, validate_new_movie, validate_patch};
use crate::domain::{CatalogError, ImageUpload, Movie, MoviePatch, NewMovie};
use crate::repository::MovieRepository;
use crate::utils::filename::upload_extension;

/// Coordinates movie records with their cover image files.
///
/// The repository never touches the filesystem and the image store never
/// touches the database; every flow that needs both goes through here.
/// Removing a stale image file is best-effort: failures are logged and never
/// block the metadata change.
#[derive(Clone)]
pub struct MovieService {
    repo: Arc<dyn MovieRepository>,
    images: Arc<dyn ImageStore>,
}

impl MovieService {
    pub fn new(repo: Arc<dyn MovieRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repo, images }
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, CatalogError> {
        self.repo.list_all().await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Movie, CatalogError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create_movie(&self, movie: NewMovie) -> Result<Movie, CatalogError> {
        validate_new_movie(&movie)?;
        self.repo.create(movie).await
    }

    pub async fn update_movie(&self, id: i32, patch: MoviePatch) -> Result<Movie, CatalogError> {
        validate_patch(&patch)?;
        self.repo.update(id, patch).await
    }

    /// Delete a movie and, if it has one, its cover image.
    #[instrument(skip(self))]
    pub async fn delete_movie(&self, id: i32) -> Result<(), CatalogError> {
        let movie = self.repo.get_by_id(id).await?;
        if let Some(image) = current_image(&movie) {
            self.discard_image(image).await;
        }
        self.repo.delete(id).await
    }

    /// Store a new cover image for a movie, replacing any previous one.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
    pub async fn attach_image(&self, id: i32, upload: ImageUpload) -> Result<Movie, CatalogError> {
        let mut movie = self.repo.get_by_id(id).await?;

        let extension = upload_extension(&upload.file_name)
            .map_err(|e| CatalogError::Validation(e.message().into()))?;
        let image_url = self.images.put(&extension, &upload.bytes).await?;

        let previous = current_image(&movie).map(str::to_string);
        movie.image_url = Some(image_url.clone());

        let movie = match self.repo.save(movie).await {
            Ok(saved) => saved,
            Err(err) => {
                self.discard_image(&image_url).await;
                return Err(err);
            }
        };

        if let Some(previous) = previous
            && previous != image_url
        {
            self.discard_image(&previous).await;
        }

        Ok(movie)
    }

    async fn discard_image(&self, path: &str) {
        match self.images.delete(path).await {
            Ok(true) => debug!(path, "Removed image file"),
            Ok(false) => debug!(path, "Image file already absent"),
            Err(err) => warn!(path, error = %err, "Failed to remove image file"),
        }
    }
}

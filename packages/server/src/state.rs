use std::sync::Arc;

use common::storage::{FilesystemImageStore, StorageError};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::repository::SeaOrmMovieRepository;
use crate::service::MovieService;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub movies: MovieService,
}

impl AppState {
    /// Wire the repository and image store around an open connection.
    pub async fn new(config: AppConfig, db: DatabaseConnection) -> Result<Self, StorageError> {
        let images = FilesystemImageStore::new(
            config.storage.upload_dir.clone(),
            &config.storage.url_prefix,
            config.storage.max_image_size,
        )
        .await?;
        let movies = MovieService::new(
            Arc::new(SeaOrmMovieRepository::new(db.clone())),
            Arc::new(images),
        );

        Ok(Self { db, config, movies })
    }
}

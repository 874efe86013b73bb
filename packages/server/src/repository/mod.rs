mod movie;

use async_trait::async_trait;

use crate::domain::{CatalogError, Movie, MoviePatch, NewMovie};

pub use movie::SeaOrmMovieRepository;

/// Persistence for movie records.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Every movie, in id order.
    async fn list_all(&self) -> Result<Vec<Movie>, CatalogError>;

    /// Fails with [`CatalogError::NotFound`] if no movie has this id.
    async fn get_by_id(&self, id: i32) -> Result<Movie, CatalogError>;

    /// Insert a movie, assigning its id and timestamps.
    async fn create(&self, movie: NewMovie) -> Result<Movie, CatalogError>;

    /// Apply only the fields present in `patch`. An empty patch returns the
    /// current record unchanged.
    async fn update(&self, id: i32, patch: MoviePatch) -> Result<Movie, CatalogError>;

    /// Fails with [`CatalogError::NotFound`] if no row was deleted.
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;

    /// Overwrite every column of an existing movie.
    async fn save(&self, movie: Movie) -> Result<Movie, CatalogError>;
}

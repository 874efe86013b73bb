use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use tracing::instrument;

use super::MovieRepository;
use crate::domain::{CatalogError, Movie, MoviePatch, NewMovie};
use crate::entity::movie;

/// [`MovieRepository`] backed by a sea-orm connection.
#[derive(Clone)]
pub struct SeaOrmMovieRepository {
    db: DatabaseConnection,
}

impl SeaOrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepository for SeaOrmMovieRepository {
    async fn list_all(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Movie, CatalogError> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self, new_movie), fields(title = %new_movie.title))]
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, CatalogError> {
        let now = Utc::now();
        let active = movie::ActiveModel {
            title: Set(new_movie.title.trim().to_string()),
            director: Set(new_movie.director.trim().to_string()),
            year: Set(new_movie.year),
            rating: Set(new_movie.rating),
            image_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(active.insert(&self.db).await?)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i32, patch: MoviePatch) -> Result<Movie, CatalogError> {
        let existing = self.get_by_id(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active: movie::ActiveModel = existing.into();
        if let Some(ref title) = patch.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(ref director) = patch.director {
            active.director = Set(director.trim().to_string());
        }
        if let Some(year) = patch.year {
            active.year = Set(year);
        }
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&self.db)
            .await
            .map_err(|e| CatalogError::from_write(id, e))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, record), fields(id = record.id))]
    async fn save(&self, record: Movie) -> Result<Movie, CatalogError> {
        let id = record.id;
        let active = movie::ActiveModel {
            id: Unchanged(record.id),
            title: Set(record.title),
            director: Set(record.director),
            year: Set(record.year),
            rating: Set(record.rating),
            image_url: Set(record.image_url),
            created_at: Set(record.created_at),
            updated_at: Set(Utc::now()),
        };

        active
            .update(&self.db)
            .await
            .map_err(|e| CatalogError::from_write(id, e))
    }
}

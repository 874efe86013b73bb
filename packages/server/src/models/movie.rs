use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Movie, MoviePatch, NewMovie};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMovieRequest {
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = "Denis Villeneuve")]
    pub director: String,
    #[schema(example = 2021)]
    pub year: i32,
    #[schema(example = 8.5)]
    pub rating: f32,
}

/// Partial update body. Omitted fields keep their current value; unknown
/// fields (including `image_url`) are rejected.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MovieResponse {
    #[serde(rename = "ID")]
    #[schema(example = 1)]
    pub id: i32,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f32,
    /// Relative URL of the cover image, served from the upload route.
    #[schema(example = "uploads/img_a1B2c3D4e5F6g7H8.png")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteMovieResponse {
    #[schema(example = "Movie has been deleted")]
    pub message: String,
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(req: CreateMovieRequest) -> Self {
        Self {
            title: req.title,
            director: req.director,
            year: req.year,
            rating: req.rating,
        }
    }
}

impl From<UpdateMovieRequest> for MoviePatch {
    fn from(req: UpdateMovieRequest) -> Self {
        Self {
            title: req.title,
            director: req.director,
            year: req.year,
            rating: req.rating,
        }
    }
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            director: m.director,
            year: m.year,
            rating: m.rating,
            image_url: m.image_url.filter(|url| !url.is_empty()),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub mod error;
pub mod movie;

pub use error::CatalogError;
pub use movie::{ImageUpload, Movie, MoviePatch, NewMovie};

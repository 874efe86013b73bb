use super::error::CatalogError;

/// A persisted movie record.
pub type Movie = crate::entity::movie::Model;

/// Fields required to create a movie. The id and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f32,
}

/// Partial update of a movie. `None` fields are left untouched.
///
/// The image URL is not patchable; it only changes through image upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f32>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An uploaded cover image as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied filename; only its extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Returns the image URL of a movie, treating an empty string as "no image".
pub fn current_image(movie: &Movie) -> Option<&str> {
    movie.image_url.as_deref().filter(|url| !url.is_empty())
}

/// Validate a required text field (1-256 Unicode characters after trimming).
fn validate_text(field: &str, value: &str) -> Result<(), CatalogError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(CatalogError::Validation(format!(
            "{field} must be 1-256 characters"
        )));
    }
    Ok(())
}

fn validate_rating(rating: f32) -> Result<(), CatalogError> {
    if !rating.is_finite() {
        return Err(CatalogError::Validation("Rating must be a finite number".into()));
    }
    Ok(())
}

pub fn validate_new_movie(movie: &NewMovie) -> Result<(), CatalogError> {
    validate_text("Title", &movie.title)?;
    validate_text("Director", &movie.director)?;
    validate_rating(movie.rating)
}

pub fn validate_patch(patch: &MoviePatch) -> Result<(), CatalogError> {
    if let Some(ref title) = patch.title {
        validate_text("Title", title)?;
    }
    if let Some(ref director) = patch.director {
        validate_text("Director", director)?;
    }
    if let Some(rating) = patch.rating {
        validate_rating(rating)?;
    }
    Ok(())
}

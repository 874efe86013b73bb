use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::domain::ImageUpload;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::movie::*;
use crate::state::AppState;

/// Multipart field carrying the cover image.
pub const IMAGE_FIELD: &str = "image";

/// Body limit for the upload route: the image itself plus multipart framing.
pub fn image_upload_body_limit(max_image_size: u64) -> DefaultBodyLimit {
    let limit = usize::try_from(max_image_size)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024);
    DefaultBodyLimit::max(limit)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Movies",
    operation_id = "listMovies",
    summary = "List all movies",
    description = "Returns every movie in the catalog, ordered by ID.",
    responses(
        (status = 200, description = "All movies", body = Vec<MovieResponse>),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    let movies = state.movies.list_movies().await?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Movies",
    operation_id = "getMovie",
    summary = "Get a movie by ID",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie details", body = MovieResponse),
        (status = 400, description = "Invalid movie ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Movie not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_movie(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = state.movies.get_movie(id).await?;
    Ok(Json(movie.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Movies",
    operation_id = "createMovie",
    summary = "Create a new movie",
    description = "Creates a movie without an image. Attach a cover afterwards via the upload endpoint.",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_movie(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMovieRequest>,
) -> Result<impl IntoResponse, AppError> {
    let movie = state.movies.create_movie(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(MovieResponse::from(movie))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Movies",
    operation_id = "updateMovie",
    summary = "Update an existing movie",
    description = "Partially updates a movie: only provided fields are modified. \
        The same handler also answers PATCH. The image URL cannot be set here.",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Invalid ID or body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Movie not found or storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_movie(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateMovieRequest>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = state
        .movies
        .update_movie(id, payload.into())
        .await
        .map_err(AppError::from_write)?;
    Ok(Json(movie.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Movies",
    operation_id = "deleteMovie",
    summary = "Delete a movie by ID",
    description = "Deletes the movie and its cover image file, if any.",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie deleted", body = DeleteMovieResponse),
        (status = 400, description = "Invalid movie ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Movie not found or storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_movie(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<DeleteMovieResponse>, AppError> {
    state
        .movies
        .delete_movie(id)
        .await
        .map_err(AppError::from_write)?;
    Ok(Json(DeleteMovieResponse {
        message: "Movie has been deleted".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/upload",
    tag = "Movies",
    operation_id = "uploadMovieImage",
    summary = "Upload a cover image",
    description = "Stores the `image` multipart field as the movie's cover under a generated \
        `img_<token><ext>` filename. A previous cover is removed.",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body(content_type = "multipart/form-data", description = "Image file in the `image` field"),
    responses(
        (status = 200, description = "Image attached", body = MovieResponse),
        (status = 400, description = "Invalid ID, missing or malformed file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Movie not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Image too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "I/O or storage failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    mut multipart: Multipart,
) -> Result<Json<MovieResponse>, AppError> {
    state.movies.get_movie(id).await?;

    let max_size = state.config.storage.max_image_size;
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue; // Ignore unknown fields.
        }
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Validation("Image field must have a filename".into()))?;
        let bytes = read_field_limited(field, max_size).await?;
        upload = Some(ImageUpload { file_name, bytes });
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".into()))?;
    let movie = state.movies.attach_image(id, upload).await?;

    Ok(Json(movie.into()))
}

/// Buffer a multipart field, failing as soon as it grows past `max_size`.
async fn read_field_limited(mut field: Field<'_>, max_size: u64) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (bytes.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "Image exceeds maximum size of {max_size} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

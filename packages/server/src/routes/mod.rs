use axum::routing::{get, patch};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn movie_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::movie::upload_image))
        .layer(handlers::movie::image_upload_body_limit(
            config.storage.max_image_size,
        ));

    OpenApiRouter::new()
        .routes(routes!(
            handlers::movie::list_movies,
            handlers::movie::create_movie
        ))
        .routes(routes!(
            handlers::movie::get_movie,
            handlers::movie::update_movie,
            handlers::movie::delete_movie
        ))
        // PATCH shares the PUT handler and is left out of the OpenAPI document.
        .route("/{id}", patch(handlers::movie::update_movie))
        .merge(upload)
}

/// `/movies/` with a trailing slash, answered by the collection handlers.
/// Kept out of the OpenAPI document.
pub fn movie_collection_alias() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().route(
        "/movies/",
        get(handlers::movie::list_movies).post(handlers::movie::create_movie),
    )
}

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::health::health))
}

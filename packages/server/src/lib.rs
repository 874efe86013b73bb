pub mod config;
pub mod database;
pub mod domain;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        version = "1.0.0",
        description = "Movie catalog with cover image uploads"
    ),
    tags(
        (name = "Movies", description = "Movie CRUD and cover images"),
        (name = "Health", description = "Service health"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/movies", routes::movie_routes(&state.config))
        .merge(routes::movie_collection_alias())
        .merge(routes::health_routes())
        .split_for_parts();

    let uploads_route = format!("/{}", state.config.storage.url_prefix.trim_matches('/'));
    let uploads = ServeDir::new(&state.config.storage.upload_dir);
    let cors = build_cors_layer(&state.config.server.cors);

    router
        .nest_service(&uploads_route, uploads)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

/// Build the CORS layer. An empty origin list allows any origin; origins
/// that fail to parse are logged and skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", o, e);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

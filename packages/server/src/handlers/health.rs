use axum::Json;
use axum::extract::State;

use crate::error::{AppError, ErrorBody};
use crate::models::health::HealthResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness and database check",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.db.ping().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        database: "up",
    }))
}

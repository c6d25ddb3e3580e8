use crate::AppState;
use crate::api::error::AppError;
use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct GreetingResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub data: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = GreetingResponse)
    ),
    tag = "system"
)]
pub async fn root() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Hello world".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Metadata store reachable", body = HealthResponse),
        (status = 503, description = "Metadata store unreachable")
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    match state.db.ping().await {
        Ok(()) => Ok(Json(HealthResponse {
            data: "Database connection is healthy".to_string(),
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(AppError::ServiceUnavailable(
                "Database connection is not healthy".to_string(),
            ))
        }
    }
}

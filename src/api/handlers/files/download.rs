use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::required;
use axum::{
    Json,
    extract::{Query, State},
};

use super::types::*;

#[utoipa::path(
    get,
    path = "/getUrl",
    params(IdQuery),
    responses(
        (status = 200, description = "Time-limited download link", body = UrlResponse),
        (status = 400, description = "Missing id", body = MessageResponse),
        (status = 404, description = "Record or object does not exist", body = MessageResponse)
    ),
    tag = "files"
)]
pub async fn get_url(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<UrlResponse>, AppError> {
    let id = required(query.id, "Please provide a file Id")?;

    let url = state.file_service.download_url(&id).await?;

    Ok(Json(UrlResponse { url }))
}

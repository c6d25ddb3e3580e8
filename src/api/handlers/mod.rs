pub mod file_types;
pub mod files;
pub mod health;

use crate::api::error::AppError;
use axum::{Json, extract::rejection::JsonRejection};
use crate::services::file_service::types::present;

/// A required text field: absent or empty is a 400 with `message`.
pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    present(value).ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// A required list field: absent or empty is a 400 with `message`.
pub(crate) fn required_list(
    value: Option<Vec<String>>,
    message: &str,
) -> Result<Vec<String>, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// Unwraps a JSON body, turning a missing content type or malformed payload into a 400 with `message`.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::BadRequest(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    }
}

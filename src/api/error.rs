use crate::services::file_service::FileServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    /// A dependency failed; the message is generic, details are logged where the error arose.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// One store changed and the other did not; the message names which.
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<FileServiceError> for AppError {
    fn from(err: FileServiceError) -> Self {
        let message = err.to_string();
        match err {
            FileServiceError::MissingFile
            | FileServiceError::MissingFileType
            | FileServiceError::UnknownFileType(_)
            | FileServiceError::MissingFileName
            | FileServiceError::MissingDescription
            | FileServiceError::InvalidDescription(_)
            | FileServiceError::ExtensionNotAllowed { .. }
            | FileServiceError::MimeTypeNotAllowed { .. } => AppError::BadRequest(message),
            FileServiceError::FileTooLarge { .. } => AppError::PayloadTooLarge(message),
            FileServiceError::ObjectAlreadyExists(_) => AppError::Forbidden(message),
            FileServiceError::RecordNotFound => AppError::NotFound(message),
            FileServiceError::FileTypeMissing(ref code) => {
                tracing::warn!("File record references unknown type '{}'", code);
                AppError::NotFound(message)
            }
            FileServiceError::ObjectMissing(ref location) => {
                tracing::warn!("File record points at missing object {}", location);
                AppError::NotFound(message)
            }
            FileServiceError::StatusCheckFailed(ref e)
            | FileServiceError::PutFailed(ref e)
            | FileServiceError::DeleteFailed(ref e)
            | FileServiceError::PresignFailed(ref e) => {
                tracing::error!("{}: {:?}", message, e);
                AppError::Upstream(message)
            }
            FileServiceError::Database(ref e) => {
                tracing::error!("{}: {:?}", message, e);
                AppError::Upstream(message)
            }
            FileServiceError::StoredButNotRecorded {
                ref location,
                ref source,
            }
            | FileServiceError::RemovedButStillRecorded {
                ref location,
                ref source,
            } => {
                tracing::error!(
                    "{} ({} needs manual reconciliation): {:?}",
                    message,
                    location,
                    source
                );
                AppError::PartialFailure(message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Upstream(msg) | AppError::PartialFailure(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

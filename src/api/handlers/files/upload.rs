use crate::AppState;
use crate::api::error::AppError;
use crate::services::file_service::{UploadRequest, UploadedFile};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
};

use super::types::*;

fn map_multipart_error(e: MultipartError) -> AppError {
    let err_msg = e.to_string();
    if err_msg.contains("length limit exceeded") {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(err_msg)
    }
}

/// Collects the `file`, `fileType` and `description` fields. Unknown fields are skipped.
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadRequest, AppError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                if request.file.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one file may be uploaded at a time".to_string(),
                    ));
                }
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(map_multipart_error)?;
                request.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            "fileType" => {
                request.file_type = Some(field.text().await.map_err(map_multipart_error)?);
            }
            "description" => {
                request.description = Some(field.text().await.map_err(map_multipart_error)?);
            }
            other => tracing::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(request)
}

#[utoipa::path(
    post,
    path = "/uploadFile",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored and recorded", body = UploadResponse),
        (status = 400, description = "Validation failure", body = MessageResponse),
        (status = 403, description = "An object already exists at the derived key", body = MessageResponse),
        (status = 413, description = "File too large", body = MessageResponse),
        (status = 500, description = "Storage or database failure", body = MessageResponse)
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart
        .map_err(|_| AppError::BadRequest("Not a multipart form upload.".to_string()))?;

    let request = match read_upload_form(&mut multipart).await {
        Ok(request) => request,
        Err(e) => {
            // Drain the rest of the body so the client sees our response instead of a reset
            tracing::warn!("Upload form rejected: {}. Consuming remaining stream...", e);
            while let Ok(Some(mut field)) = multipart.next_field().await {
                while let Ok(Some(_)) = field.chunk().await {}
            }
            return Err(e);
        }
    };

    let record = state.file_service.upload(request).await?;

    Ok(Json(UploadResponse {
        message: "File upload was successful".to_string(),
        data: record,
    }))
}

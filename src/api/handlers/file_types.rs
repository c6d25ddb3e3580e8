use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::files::{IdQuery, MessageResponse};
use crate::api::handlers::{json_body, required, required_list};
use crate::models::{FileType, FileTypeInput, FileTypeListing};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema)]
pub struct FileTypeRequest {
    /// Required by `/updateFileType`, ignored by `/newFileType`.
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub code: Option<String>,
    pub text: Option<String>,
    pub help: Option<String>,
    pub mimetypes: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub bucket: Option<String>,
    pub path: Option<String>,
}

impl FileTypeRequest {
    /// Checks each field in turn, so the first missing one names the error.
    fn into_input(self) -> Result<FileTypeInput, AppError> {
        let input = FileTypeInput {
            code: required(self.code, "Please provide file type")?,
            text: required(self.text, "Please provide file text")?,
            help: required(self.help, "Please provide file help")?,
            mime_types: required_list(self.mimetypes, "Please provide mimetypes")?,
            extensions: required_list(self.extensions, "Please provide extensions")?,
            bucket: required(self.bucket, "Please provide bucket")?,
            path: required(self.path, "Please provide bucket path")?,
        };
        input
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(input)
    }
}

#[derive(Serialize, ToSchema)]
pub struct FileTypeResponse {
    pub data: FileType,
}

#[derive(Serialize, ToSchema)]
pub struct FileTypeListResponse {
    pub data: Vec<FileTypeListing>,
}

#[utoipa::path(
    get,
    path = "/getFileType",
    params(IdQuery),
    responses(
        (status = 200, description = "File type", body = FileTypeResponse),
        (status = 400, description = "Missing id", body = MessageResponse),
        (status = 404, description = "File type does not exist", body = MessageResponse)
    ),
    tag = "file types"
)]
pub async fn get_file_type(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<FileTypeResponse>, AppError> {
    let id = required(query.id, "Please provide a file type id")?;

    let file_type = state
        .file_types
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("File type does not exist".to_string()))?;

    Ok(Json(FileTypeResponse { data: file_type }))
}

#[utoipa::path(
    get,
    path = "/getFileTypes",
    responses(
        (status = 200, description = "All file types ordered by code", body = FileTypeListResponse)
    ),
    tag = "file types"
)]
pub async fn get_file_types(
    State(state): State<AppState>,
) -> Result<Json<FileTypeListResponse>, AppError> {
    let types = state.file_types.list_all().await?;
    Ok(Json(FileTypeListResponse {
        data: types.into_iter().map(FileTypeListing::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/newFileType",
    request_body = FileTypeRequest,
    responses(
        (status = 201, description = "File type created", body = MessageResponse),
        (status = 400, description = "Missing or invalid field", body = MessageResponse),
        (status = 409, description = "Type code already registered", body = MessageResponse)
    ),
    tag = "file types"
)]
pub async fn new_file_type(
    State(state): State<AppState>,
    payload: Result<Json<FileTypeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let input = json_body(payload)?.into_input()?;

    if state.file_types.lookup(&input.code).await?.is_some() {
        return Err(AppError::Conflict("File type already exists".to_string()));
    }

    state.file_types.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Successfully created file type")),
    ))
}

#[utoipa::path(
    put,
    path = "/updateFileType",
    request_body = FileTypeRequest,
    responses(
        (status = 201, description = "File type replaced", body = MessageResponse),
        (status = 400, description = "Missing or invalid field", body = MessageResponse),
        (status = 404, description = "File type does not exist", body = MessageResponse),
        (status = 409, description = "Type code belongs to another file type", body = MessageResponse)
    ),
    tag = "file types"
)]
pub async fn update_file_type(
    State(state): State<AppState>,
    payload: Result<Json<FileTypeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let mut req = json_body(payload)?;
    let id = required(req.id.take(), "Please provide file id")?;
    let input = req.into_input()?;

    if state.file_types.find(&id).await?.is_none() {
        return Err(AppError::NotFound("File type does not exist".to_string()));
    }

    if let Some(other) = state.file_types.lookup(&input.code).await? {
        if other.id != id {
            return Err(AppError::Conflict(
                "File type code is already in use".to_string(),
            ));
        }
    }

    // Files recorded under the old code are not migrated and stop resolving if it changes
    state
        .file_types
        .replace(&id, input)
        .await?
        .ok_or_else(|| AppError::NotFound("File type does not exist".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Successfully updated file type")),
    ))
}

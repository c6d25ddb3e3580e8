use crate::models::FileRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct FileResponse {
    pub data: FileRecord,
}

#[derive(Serialize, ToSchema)]
pub struct FileListResponse {
    pub data: Vec<FileRecord>,
}

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub data: FileRecord,
}

#[derive(Serialize, ToSchema)]
pub struct UrlResponse {
    pub url: String,
}

#[derive(Deserialize, ToSchema)]
pub struct NewFileRequest {
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateFileRequest {
    pub id: Option<String>,
    pub description: Option<String>,
}

/// Multipart form accepted by `/uploadFile`.
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    #[serde(rename = "fileType")]
    pub file_type: String,
    pub description: String,
}

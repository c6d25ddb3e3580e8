use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::{json_body, required};
use crate::models::{FileRecordPatch, NewFileRecord};
use crate::services::file_service::types::present;
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
};

use super::types::*;

#[utoipa::path(
    get,
    path = "/getFile",
    params(IdQuery),
    responses(
        (status = 200, description = "File record", body = FileResponse),
        (status = 400, description = "Missing id", body = MessageResponse),
        (status = 404, description = "File does not exist", body = MessageResponse)
    ),
    tag = "files"
)]
pub async fn get_file(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<FileResponse>, AppError> {
    let id = required(query.id, "Please provide file id")?;

    let record = state
        .files
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("File does not exist".to_string()))?;

    Ok(Json(FileResponse { data: record }))
}

#[utoipa::path(
    get,
    path = "/getFiles",
    responses(
        (status = 200, description = "All file records ordered by name", body = FileListResponse)
    ),
    tag = "files"
)]
pub async fn get_files(State(state): State<AppState>) -> Result<Json<FileListResponse>, AppError> {
    let records = state.files.list().await?;
    Ok(Json(FileListResponse { data: records }))
}

#[utoipa::path(
    post,
    path = "/newFile",
    request_body = NewFileRequest,
    responses(
        (status = 201, description = "File record created", body = MessageResponse),
        (status = 400, description = "Missing field", body = MessageResponse)
    ),
    tag = "files"
)]
pub async fn new_file(
    State(state): State<AppState>,
    payload: Result<Json<NewFileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let req = json_body(payload)?;
    let new = NewFileRecord {
        file_type: required(req.file_type, "Please provide file type")?,
        name: required(req.name, "Please provide file name")?,
        description: required(req.description, "Please provide file description")?,
    };

    let record = state.file_service.create_record(new).await?;
    tracing::info!("📝 Created file record {} ({})", record.id, record.name);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Successfully created file")),
    ))
}

#[utoipa::path(
    put,
    path = "/updateFile",
    request_body = UpdateFileRequest,
    responses(
        (status = 200, description = "File record updated", body = MessageResponse),
        (status = 400, description = "Missing field", body = MessageResponse),
        (status = 404, description = "File does not exist", body = MessageResponse)
    ),
    tag = "files"
)]
pub async fn update_file(
    State(state): State<AppState>,
    payload: Result<Json<UpdateFileRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let req = json_body(payload)?;
    let id = required(req.id, "Need file Id")?;
    let description = required(req.description, "Need file description")?;

    state
        .file_service
        .update_record(
            &id,
            FileRecordPatch {
                description: Some(description),
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("File update successful")))
}

/// The id comes from a JSON body when one was sent, otherwise from the query string.
fn delete_target(headers: &HeaderMap, body: &[u8], query: IdQuery) -> Result<String, AppError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_lowercase().contains("json"))
        .unwrap_or(false);

    let id = if is_json && !body.is_empty() {
        let parsed: IdQuery = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest("Request body is not valid JSON".to_string()))?;
        parsed.id
    } else {
        query.id
    };

    present(id).ok_or_else(|| AppError::BadRequest("Please provide a file ID".to_string()))
}

#[utoipa::path(
    delete,
    path = "/deleteFile",
    params(IdQuery),
    request_body(content = IdQuery, description = "Optional alternative to the query string"),
    responses(
        (status = 200, description = "Object and record deleted", body = MessageResponse),
        (status = 400, description = "Missing id", body = MessageResponse),
        (status = 404, description = "Record or object does not exist", body = MessageResponse),
        (status = 500, description = "Storage failure or partial deletion", body = MessageResponse)
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let id = delete_target(&headers, &body, query)?;

    state.file_service.delete(&id).await?;

    Ok(Json(MessageResponse::new("File deletion successful")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    fn query(id: Option<&str>) -> IdQuery {
        IdQuery {
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_json_body_wins_over_query() {
        let id = delete_target(&json_headers(), br#"{"id":"from-body"}"#, query(Some("from-query")))
            .unwrap();
        assert_eq!(id, "from-body");
    }

    #[test]
    fn test_query_used_without_json_content_type() {
        let id = delete_target(&HeaderMap::new(), br#"{"id":"from-body"}"#, query(Some("q1")))
            .unwrap();
        assert_eq!(id, "q1");
    }

    #[test]
    fn test_query_used_for_empty_json_body() {
        let id = delete_target(&json_headers(), b"", query(Some("q2"))).unwrap();
        assert_eq!(id, "q2");
    }

    #[test]
    fn test_missing_id_is_bad_request() {
        let err = delete_target(&HeaderMap::new(), b"", query(None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Please provide a file ID"));

        let err = delete_target(&json_headers(), br#"{"id":""}"#, query(None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let err = delete_target(&json_headers(), b"{not json", query(Some("q"))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}

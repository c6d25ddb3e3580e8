pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::file_service::FileService;
use crate::services::file_types::FileTypeRegistry;
use crate::services::files::FileRepository;
use crate::services::storage::StorageService;
use crate::api::middleware::request_id::{REQUEST_ID_HEADER, request_id_middleware};
use axum::{
    Router,
    http::{Request, Response},
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::root,
        api::handlers::health::health_check,
        api::handlers::files::get_file,
        api::handlers::files::get_files,
        api::handlers::files::new_file,
        api::handlers::files::update_file,
        api::handlers::files::delete_file,
        api::handlers::files::upload_file,
        api::handlers::files::get_url,
        api::handlers::file_types::get_file_type,
        api::handlers::file_types::get_file_types,
        api::handlers::file_types::new_file_type,
        api::handlers::file_types::update_file_type,
    ),
    components(
        schemas(
            models::FileRecord,
            models::FileType,
            models::FileTypeListing,
            api::handlers::health::GreetingResponse,
            api::handlers::health::HealthResponse,
            api::handlers::files::IdQuery,
            api::handlers::files::MessageResponse,
            api::handlers::files::FileResponse,
            api::handlers::files::FileListResponse,
            api::handlers::files::UploadResponse,
            api::handlers::files::UrlResponse,
            api::handlers::files::NewFileRequest,
            api::handlers::files::UpdateFileRequest,
            api::handlers::files::UploadForm,
            api::handlers::file_types::FileTypeRequest,
            api::handlers::file_types::FileTypeResponse,
            api::handlers::file_types::FileTypeListResponse,
        )
    ),
    tags(
        (name = "system", description = "Liveness endpoints"),
        (name = "files", description = "File upload and metadata endpoints"),
        (name = "file types", description = "File type registry endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub files: FileRepository,
    pub file_types: FileTypeRegistry,
    pub file_service: Arc<FileService>,
    /// Allowed browser origins, read once at start-up.
    pub origins: Arc<Vec<String>>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn StorageService>,
        origins: Vec<String>,
        config: AppConfig,
    ) -> Self {
        let files = FileRepository::new(db.clone());
        let file_types = FileTypeRegistry::new(db.clone());
        let file_service = Arc::new(FileService::new(
            files.clone(),
            file_types.clone(),
            storage,
            config.clone(),
        ));

        Self {
            db,
            files,
            file_types,
            file_service,
            origins: Arc::new(origins),
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    use api::handlers::{file_types, files, health};

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/getFile", get(files::get_file))
        .route("/getFiles", get(files::get_files))
        .route("/newFile", post(files::new_file))
        .route("/updateFile", put(files::update_file))
        .route("/deleteFile", delete(files::delete_file))
        .route(
            "/uploadFile",
            post(files::upload_file).layer(axum::extract::DefaultBodyLimit::max(
                state.config.upload_body_limit(),
            )),
        )
        .route("/getUrl", get(files::get_url))
        .route("/getFileType", get(file_types::get_file_type))
        .route("/getFileTypes", get(file_types::get_file_types))
        .route("/newFileType", post(file_types::new_file_type))
        .route("/updateFileType", put(file_types::update_file_type))
        .layer(api::middleware::cors::create_cors_layer(&state.origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(|request: &Request<_>, _span: &tracing::Span| {
                    tracing::info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, _span: &tracing::Span| {
                        tracing::info!(
                            "📤 Finished in {:?} with status {}",
                            latency,
                            response.status()
                        );
                    },
                ),
        )
        // Outermost, so the trace span above already sees the id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

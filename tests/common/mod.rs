#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use file_registry::config::AppConfig;
use file_registry::infrastructure::database;
use file_registry::services::storage::{ObjectLocation, StorageService};
use file_registry::{AppState, create_app};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----file-registry-test-boundary";

pub async fn setup_test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // One connection, otherwise each pooled connection gets its own empty in-memory database
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    database::run_migrations(&db).await.unwrap();
    db
}

/// In-memory object store with switches for simulating failures.
#[derive(Default)]
pub struct MockStorageService {
    objects: Mutex<HashMap<ObjectLocation, (Vec<u8>, String)>>,
    pub fail_exists: AtomicBool,
    pub fail_put: AtomicBool,
    pub fail_delete: AtomicBool,
    pub puts: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl MockStorageService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects.lock().unwrap().insert(
            location(bucket, key),
            (data.to_vec(), "application/octet-stream".to_string()),
        );
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .lock()
            .unwrap()
            .get(&location(bucket, key))
            .cloned()
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.get(bucket, key).is_some()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

fn location(bucket: &str, key: &str) -> ObjectLocation {
    ObjectLocation {
        bucket: bucket.to_string(),
        key: key.to_string(),
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn object_exists(&self, location: &ObjectLocation) -> anyhow::Result<bool> {
        if self.fail_exists.load(Ordering::SeqCst) {
            anyhow::bail!("simulated head_object failure");
        }
        Ok(self.objects.lock().unwrap().contains_key(location))
    }

    async fn put_object(
        &self,
        location: &ObjectLocation,
        data: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            anyhow::bail!("simulated put_object failure");
        }
        self.objects
            .lock()
            .unwrap()
            .insert(location.clone(), (data, content_type.to_string()));
        Ok(())
    }

    async fn delete_object(&self, location: &ObjectLocation) -> anyhow::Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            anyhow::bail!("simulated delete_object failure");
        }
        self.objects.lock().unwrap().remove(location);
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        location: &ObjectLocation,
        expires_in: Duration,
    ) -> anyhow::Result<String> {
        Ok(format!(
            "https://{}.s3.test/{}?X-Amz-Expires={}",
            location.bucket,
            location.key,
            expires_in.as_secs()
        ))
    }
}

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    pub storage: Arc<MockStorageService>,
}

pub async fn setup_app() -> TestApp {
    setup_app_with(AppConfig::default(), vec!["http://localhost:5173".to_string()]).await
}

pub async fn setup_app_with(config: AppConfig, origins: Vec<String>) -> TestApp {
    let db = setup_test_db().await;
    let storage = MockStorageService::new();
    let state = AppState::new(db.clone(), storage.clone(), origins, config);
    TestApp {
        app: create_app(state),
        db,
        storage,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("non-JSON body: {}", String::from_utf8_lossy(&body))
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Registers the `image` type used across the suite.
    pub async fn register_image_type(&self) {
        let (status, body) = self.send_json("POST", "/newFileType", image_type()).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    pub async fn upload(&self, form: &Multipart) -> (StatusCode, Value) {
        self.send(form.request()).await
    }

    /// Id of the only stored record with the given name.
    pub async fn record_id(&self, name: &str) -> String {
        let (_, body) = self.get("/getFiles").await;
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["name"] == name)
            .and_then(|r| r["id"].as_str())
            .unwrap()
            .to_string()
    }
}

pub fn image_type() -> Value {
    serde_json::json!({
        "type": "image",
        "text": "Image",
        "help": "JPEG or PNG pictures",
        "extensions": ["jpg", "png"],
        "mimetypes": ["image/jpeg", "image/png"],
        "bucket": "b1",
        "path": "images"
    })
}

/// Hand-built multipart body.
#[derive(Default)]
pub struct Multipart {
    parts: Vec<String>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
        self
    }

    pub fn file(mut self, file_name: &str, content_type: &str, data: &str) -> Self {
        self.parts.push(format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
        ));
        self
    }

    /// A `file` part whose Content-Disposition carries no filename.
    pub fn file_without_name(mut self, content_type: &str, data: &str) -> Self {
        self.parts.push(format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
        ));
        self
    }

    pub fn body(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for part in &self.parts {
            body.extend_from_slice(part.as_bytes());
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub fn request(&self) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/uploadFile")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body()))
            .unwrap()
    }
}

pub fn cat_upload() -> Multipart {
    Multipart::new()
        .file("cat.jpg", "image/jpeg", "not really a jpeg")
        .text("fileType", "image")
        .text("description", "A cat")
}

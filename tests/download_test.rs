mod common;

use axum::http::StatusCode;
use common::{cat_upload, setup_app};
use sea_orm::ConnectionTrait;

#[tokio::test]
async fn test_get_url_returns_presigned_link() {
    let t = setup_app().await;
    t.register_image_type().await;
    t.upload(&cat_upload()).await;
    let id = t.record_id("cat.jpg").await;

    let (status, body) = t.get(&format!("/getUrl?id={}", id)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let url = body["url"].as_str().unwrap();
    assert!(url.contains("b1"));
    assert!(url.contains("images/cat.jpg"));
    assert!(url.contains("X-Amz-Expires=300"));
}

#[tokio::test]
async fn test_get_url_requires_id() {
    let t = setup_app().await;

    let (status, body) = t.get("/getUrl").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide a file Id");
}

#[tokio::test]
async fn test_get_url_for_unknown_record() {
    let t = setup_app().await;

    let (status, body) = t.get("/getUrl?id=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "File does not exist");
}

#[tokio::test]
async fn test_get_url_when_object_is_gone() {
    let t = setup_app().await;
    t.register_image_type().await;
    let (status, _) = t
        .send_json(
            "POST",
            "/newFile",
            serde_json::json!({"type": "image", "name": "ghost.jpg", "description": "never stored"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = t.record_id("ghost.jpg").await;

    let (status, body) = t.get(&format!("/getUrl?id={}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Object does not exist in S3");
}

#[tokio::test]
async fn test_get_url_when_file_type_was_removed() {
    let t = setup_app().await;
    t.register_image_type().await;
    t.upload(&cat_upload()).await;
    let id = t.record_id("cat.jpg").await;

    t.db.execute_unprepared("DELETE FROM file_types")
        .await
        .unwrap();

    let (status, body) = t.get(&format!("/getUrl?id={}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "File type for this file no longer exists");
}

#[tokio::test]
async fn test_repeated_status_checks_agree() {
    let t = setup_app().await;
    t.register_image_type().await;
    t.upload(&cat_upload()).await;
    t.send_json(
        "POST",
        "/newFile",
        serde_json::json!({"type": "image", "name": "ghost.jpg", "description": "never stored"}),
    )
    .await;
    let stored = t.record_id("cat.jpg").await;
    let ghost = t.record_id("ghost.jpg").await;

    for _ in 0..2 {
        let (status, _) = t.get(&format!("/getUrl?id={}", stored)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = t.get(&format!("/getUrl?id={}", ghost)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // Checking status never writes
    assert_eq!(t.storage.put_count(), 1);
    assert_eq!(t.storage.delete_count(), 0);
}

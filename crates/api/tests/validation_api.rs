//! Integration tests for request validation across the generation and chat
//! endpoints. All rejections happen before any collaborator or database
//! access.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// /generate/comic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn comic_with_empty_story_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/generate/comic",
        json!({"storyText": "   "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn comic_with_zero_pages_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/generate/comic",
        json!({"storyText": "a story", "pageCount": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn comic_with_excessive_pages_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/generate/comic",
        json!({"storyText": "a story", "pageCount": 100}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// /generate/ppt
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ppt_with_empty_prompt_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/generate/ppt", json!({"prompt": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// /generate/architecture
// ---------------------------------------------------------------------------

#[tokio::test]
async fn architecture_with_empty_prompt_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/generate/architecture", json!({"prompt": " "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// /chat
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_with_empty_message_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/chat", json!({"message": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// /generations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_with_unknown_type_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/generations?type=poster").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

//! Integration tests for the streaming chat endpoint, driven by a mock LLM.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_text, post_json, MockLlm};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: chat streams the assistant reply as plain text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_streams_assistant_text() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/chat", json!({"message": "hi"})).await;

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .expect("content-type header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(
        content_type.starts_with("text/plain"),
        "chat must stream plain text, got: {content_type}"
    );

    assert_eq!(body_text(response).await, "Hello world");
}

// ---------------------------------------------------------------------------
// Test: preset agent and custom system prompt are accepted
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_accepts_agent_and_custom_prompt() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/chat",
        json!({
            "agentId": "interview-coach",
            "message": "ask me something",
            "systemPrompt": "answer tersely",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello world");
}

// ---------------------------------------------------------------------------
// Test: a mid-stream failure degrades to an apology line
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_mid_stream_failure_degrades_gracefully() {
    let llm = MockLlm {
        fail_mid_stream: true,
        ..MockLlm::default()
    };
    let app = common::build_test_app_with_llm(Arc::new(llm));
    let response = post_json(app, "/api/v1/chat", json!({"message": "hi"})).await;

    // The status line is already sent by the time the stream fails.
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.starts_with("Hello world"));
    assert!(
        body.contains("Sorry, something went wrong"),
        "apology line expected, got: {body}"
    );
}

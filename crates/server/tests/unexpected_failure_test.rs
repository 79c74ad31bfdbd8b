//! # Unexpected Failure Tests
//!
//! Failures outside the pipeline's own error taxonomy still answer with the
//! standard `{ error, message, errorType }` body.

mod common;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
};
use common::{TestApp, POST_URL};
use repurpose::{GenerationOptions, RepurposePipeline};
use repurpose_server::{router::create_router, state::AppState};
use repurpose_test_utils::{MockAiProvider, MockExtractor};
use serde_json::{json, Value};
use tower::ServiceExt;

fn state_with(extractor: MockExtractor) -> AppState {
    AppState::new(RepurposePipeline::new(
        Box::new(extractor),
        Box::new(MockAiProvider::default()),
        GenerationOptions::default(),
    ))
}

#[tokio::test]
async fn test_panicking_stage_returns_server_error() -> Result<()> {
    // --- Arrange ---
    let app = TestApp::spawn_with_state(state_with(MockExtractor::panicking())).await?;

    // --- Act ---
    let response = app.post_repurpose(&json!({ "url": POST_URL })).await;

    // --- Assert ---
    assert_eq!(response.status().as_u16(), 500);
    let raw = response.text().await?;
    assert!(!raw.contains("corrupted"));
    let body: Value = serde_json::from_str(&raw)?;
    assert_eq!(
        body,
        json!({
            "error": "An error occurred while processing your request. Please try again.",
            "message": "An error occurred while processing your request. Please try again.",
            "errorType": "server_error"
        })
    );

    // The server keeps serving after the panic.
    let health = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await?;
    assert_eq!(health.status().as_u16(), 200);
    Ok(())
}

#[tokio::test]
async fn test_oversized_body_is_an_invalid_format() -> Result<()> {
    let extractor = MockExtractor::returning("unused");
    let app = create_router(state_with(extractor.clone()));
    let payload = json!({
        "url": POST_URL,
        "manualText": "a".repeat(3 * 1024 * 1024)
    });

    let request = Request::post("/repurpose")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["errorType"], "invalid_format");
    assert_eq!(body["message"], "Invalid URL format");
    assert!(extractor.get_calls().is_empty());
    Ok(())
}

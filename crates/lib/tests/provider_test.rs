//! # AI Provider Contract Tests
//!
//! Exercises the HTTP contract of both providers against a mock server: the
//! forced function call in the request, argument extraction from the response
//! and the mapping of quota statuses.

mod common;

use common::setup_tracing;
use repurpose::errors::AiError;
use repurpose::providers::ai::{
    gemini::GeminiProvider, local::LocalAiProvider, AiProvider, StructuredRequest,
};
use repurpose::schema::repurpose_tool_schema;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FUNCTION: &str = "return_repurposed_content";

fn local_provider(server: &MockServer, api_key: Option<&str>) -> LocalAiProvider {
    LocalAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        api_key.map(String::from),
        Some("test-model".to_string()),
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

fn gemini_provider(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(
        format!("{}/v1beta/models/gemini-2.5-flash:generateContent", server.uri()),
        "gemini-key".to_string(),
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

fn tool_call_response(arguments: &str) -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": FUNCTION, "arguments": arguments }
                }]
            }
        }]
    })
}

async fn call(provider: &dyn AiProvider) -> Result<String, AiError> {
    let parameters = repurpose_tool_schema(false);
    let request = StructuredRequest {
        system_prompt: "You are an expert at repurposing blog posts.",
        user_prompt: "Blog Content: hello",
        function_name: FUNCTION,
        function_description: "Return the repurposed content assets",
        parameters: &parameters,
    };
    provider.generate_structured(&request).await
}

#[tokio::test]
async fn test_local_provider_forces_the_tool_call() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "tool_choice": { "type": "function", "function": { "name": FUNCTION } },
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response(r#"{"ok":true}"#)))
        .expect(1)
        .mount(&server)
        .await;

    // --- 2. Act ---
    let provider = local_provider(&server, Some("secret"));
    let result = call(&provider).await;

    // --- 3. Assert ---
    assert_eq!(result.unwrap(), r#"{"ok":true}"#);

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "Blog Content: hello");
    assert_eq!(body["tools"][0]["function"]["name"], FUNCTION);
    assert_eq!(
        body["tools"][0]["function"]["parameters"]["additionalProperties"],
        false
    );
}

#[tokio::test]
async fn test_local_provider_maps_quota_statuses() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rate-limited"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/no-credits"))
        .respond_with(ResponseTemplate::new(402).set_body_string("pay up"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let provider_at = |route: &str| {
        LocalAiProvider::new(format!("{}{route}", server.uri()), None, None, None).unwrap()
    };

    assert!(matches!(
        call(&provider_at("/rate-limited")).await,
        Err(AiError::RateLimited)
    ));
    assert!(matches!(
        call(&provider_at("/no-credits")).await,
        Err(AiError::CreditsExhausted)
    ));
    match call(&provider_at("/broken")).await {
        Err(AiError::AiApi { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected AiApi error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_local_provider_requires_a_tool_call() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Sure! Here are your posts." } }]
        })))
        .mount(&server)
        .await;

    let result = call(&local_provider(&server, None)).await;
    assert!(matches!(result, Err(AiError::MissingToolCall)));
}

#[tokio::test]
async fn test_local_provider_times_out() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tool_call_response("{}"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = LocalAiProvider::new(
        server.uri(),
        None,
        None,
        Some(Duration::from_millis(50)),
    )
    .unwrap();
    assert!(matches!(call(&provider).await, Err(AiError::Timeout)));
}

#[tokio::test]
async fn test_gemini_provider_declares_a_sanitized_function() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "gemini-key"))
        .and(body_partial_json(json!({
            "toolConfig": {
                "functionCallingConfig": { "mode": "ANY", "allowedFunctionNames": [FUNCTION] }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "functionCall": { "name": FUNCTION, "args": { "metaDescription": "m" } } }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // --- 2. Act ---
    let result = call(&gemini_provider(&server)).await;

    // --- 3. Assert ---
    let args: Value = serde_json::from_str(&result.unwrap()).unwrap();
    assert_eq!(args, json!({ "metaDescription": "m" }));

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let declaration = &body["tools"][0]["functionDeclarations"][0];
    assert_eq!(declaration["name"], FUNCTION);
    assert!(declaration["parameters"].get("additionalProperties").is_none());
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        "You are an expert at repurposing blog posts."
    );
    assert_eq!(body["contents"][0]["role"], "user");
}

#[tokio::test]
async fn test_gemini_provider_maps_errors() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "plain prose" }] } }]
        })))
        .mount(&server)
        .await;

    let provider = gemini_provider(&server);
    assert!(matches!(call(&provider).await, Err(AiError::RateLimited)));
    assert!(matches!(call(&provider).await, Err(AiError::MissingToolCall)));
}

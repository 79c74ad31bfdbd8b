//! # Jina Reader Tests
//!
//! Checks the request the reader sends and how it reports failures.

use repurpose::errors::ExtractError;
use repurpose::providers::extract::ContentExtractor;
use repurpose_web::JinaReader;
use std::sync::Once;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn target() -> Url {
    Url::parse("https://blog.example.com/posts/hello").unwrap()
}

#[tokio::test]
async fn test_fetches_markdown_for_the_target_url() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    let markdown = "# Hello\n\nThis is the post body.";

    Mock::given(method("GET"))
        .and(path("/https://blog.example.com/posts/hello"))
        .and(header("accept", "text/markdown"))
        .and(header("authorization", "Bearer jina-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(markdown))
        .expect(1)
        .mount(&server)
        .await;

    // --- 2. Act ---
    let reader = JinaReader::new(
        format!("{}/", server.uri()),
        Some("jina-key".to_string()),
        Some(Duration::from_secs(5)),
    )
    .unwrap();
    let result = reader.extract_markdown(&target()).await;

    // --- 3. Assert ---
    assert!(result.is_ok(), "extract_markdown failed: {:?}", result.err());
    assert_eq!(result.unwrap(), markdown);
}

#[tokio::test]
async fn test_no_authorization_header_without_a_key() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body"))
        .mount(&server)
        .await;

    let reader = JinaReader::new(server.uri(), Some(String::new()), None).unwrap();
    reader.extract_markdown(&target()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(451).set_body_string("Blocked by robots"))
        .mount(&server)
        .await;

    // --- 2. Act ---
    let reader = JinaReader::new(server.uri(), None, None).unwrap();
    let result = reader.extract_markdown(&target()).await;

    // --- 3. Assert ---
    match result {
        Err(ExtractError::Status { status, body }) => {
            assert_eq!(status, 451);
            assert_eq!(body, "Blocked by robots");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_reader_times_out() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let reader = JinaReader::new(server.uri(), None, Some(Duration::from_millis(50))).unwrap();
    let result = reader.extract_markdown(&target()).await;
    assert!(matches!(result, Err(ExtractError::Timeout)));
}

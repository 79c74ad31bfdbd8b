//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port. Both outbound services,
//! the Jina Reader and the OpenAI-compatible AI endpoint, point at one
//! `httpmock::MockServer`, so tests script them per request path.

// Not every test binary uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::{Method::GET, Method::POST, Mock, MockServer};
use repurpose_server::{
    config, router,
    state::{build_app_state, AppState},
};
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// The post every test pretends to repurpose. It is never fetched directly.
pub const POST_URL: &str = "https://blog.example.com/posts/shipping-rust";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server with the base asset set.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(false).await
    }

    /// Spawns the application server, optionally requesting extended assets.
    pub async fn spawn_with(extended_assets: bool) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
extraction:
  base_url: "{}"
  timeout_secs: 5
ai:
  provider: "local"
  api_url: "{}"
  model_name: "mock-chat-model"
  timeout_secs: 5
generation:
  extended_assets: {}
"#,
            mock_server.base_url(),
            mock_server.url("/v1/chat/completions"),
            extended_assets
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(&config).await?;

        Self::launch(app_state, mock_server, Some(config_dir)).await
    }

    /// Spawns the router around a hand-built state, bypassing configuration.
    pub async fn spawn_with_state(app_state: AppState) -> Result<Self> {
        let mock_server = MockServer::start_async().await;
        Self::launch(app_state, mock_server, None).await
    }

    async fn launch(
        app_state: AppState,
        mock_server: MockServer,
        config_dir: Option<TempDir>,
    ) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Scripts the Jina Reader response for [`POST_URL`].
    pub async fn mock_reader(&self, status: u16, body: &str) -> Mock<'_> {
        self.mock_server
            .mock_async(|when, then| {
                when.method(GET).path_contains("blog.example.com/posts/shipping-rust");
                then.status(status).body(body);
            })
            .await
    }

    /// Scripts the AI endpoint to return `arguments` as the forced tool call.
    pub async fn mock_ai_arguments(&self, arguments: &Value) -> Mock<'_> {
        let body = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "type": "function",
                        "function": {
                            "name": "return_repurposed_content",
                            "arguments": arguments.to_string()
                        }
                    }]
                }
            }]
        });
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(body);
            })
            .await
    }

    /// Scripts the AI endpoint to fail with `status`.
    pub async fn mock_ai_status(&self, status: u16) -> Mock<'_> {
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(status).body("provider error");
            })
            .await
    }

    pub async fn post_repurpose(&self, payload: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/repurpose", self.address))
            .json(payload)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

//! # repurpose-web: Jina Reader Extraction
//!
//! Implements [`ContentExtractor`] on top of the Jina Reader service, which
//! fetches a public page and returns it as markdown.

use async_trait::async_trait;
use repurpose::{errors::ExtractError, providers::extract::ContentExtractor};
use reqwest::{header::ACCEPT, Client};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_JINA_BASE_URL: &str = "https://r.jina.ai";

/// Client for `GET {base_url}/{target_url}`.
#[derive(Clone, Debug)]
pub struct JinaReader {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl JinaReader {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ExtractError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ExtractError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn reader_url(&self, target: &Url) -> String {
        format!("{}/{}", self.base_url, target)
    }
}

#[async_trait]
impl ContentExtractor for JinaReader {
    async fn extract_markdown(&self, url: &Url) -> Result<String, ExtractError> {
        let fetch_url = self.reader_url(url);
        info!("Fetching clean markdown from: {fetch_url}");

        let mut request_builder = self.client.get(&fetch_url).header(ACCEPT, "text/markdown");
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, url = %url, "Jina Reader request failed");
            return Err(ExtractError::Status { status, body });
        }
        Ok(response.text().await?)
    }
}

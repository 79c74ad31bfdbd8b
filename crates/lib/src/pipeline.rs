//! # Repurposing Pipeline
//!
//! Wires the stages together: validate, acquire, derive metadata, generate.
//! The pipeline holds no per-request state and can be shared behind an `Arc`.

use crate::{
    acquire::acquire_content,
    errors::PipelineError,
    generate::{generate_assets, GenerationOptions},
    metadata::extract_metadata,
    providers::{ai::AiProvider, extract::ContentExtractor},
    types::{RepurposedContent, SourceRequest},
    validate::validate_url,
};
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct RepurposePipeline {
    extractor: Box<dyn ContentExtractor>,
    ai_provider: Box<dyn AiProvider>,
    options: GenerationOptions,
}

impl RepurposePipeline {
    pub fn new(
        extractor: Box<dyn ContentExtractor>,
        ai_provider: Box<dyn AiProvider>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            extractor,
            ai_provider,
            options,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Runs one request through every stage and returns the full result.
    ///
    /// A failure stops the run at that stage. Later stages are never touched.
    pub async fn run(&self, request: &SourceRequest) -> Result<RepurposedContent, PipelineError> {
        let started = Instant::now();
        let result = self.run_stages(request).await;
        match &result {
            Ok(_) => info!(
                url = %request.url,
                tone = %request.tone,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Repurposing finished"
            ),
            Err(e) if e.kind().http_status() >= 500 => {
                error!(url = %request.url, kind = %e.kind(), error = %e, "Repurposing failed")
            }
            Err(e) => warn!(url = %request.url, kind = %e.kind(), error = %e, "Repurposing rejected"),
        }
        result
    }

    async fn run_stages(&self, request: &SourceRequest) -> Result<RepurposedContent, PipelineError> {
        let url = validate_url(&request.url)?;
        let content =
            acquire_content(self.extractor.as_ref(), &url, request.manual_text.as_deref()).await?;
        let blog_meta = extract_metadata(&content, url.as_str());
        let assets = generate_assets(
            self.ai_provider.as_ref(),
            &content,
            request.tone,
            &self.options,
        )
        .await?;
        Ok(assets.into_content(blog_meta))
    }
}

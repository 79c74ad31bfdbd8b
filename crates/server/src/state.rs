//! # Application State
//!
//! The shared state handed to every handler: one pipeline instance wired to the
//! configured extractor and AI provider.

use crate::config::AppConfig;
use repurpose::{providers::factory::build_ai_provider, RepurposePipeline};
use repurpose_web::JinaReader;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RepurposePipeline>,
}

impl AppState {
    pub fn new(pipeline: RepurposePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let extractor = JinaReader::new(
        config.extraction.base_url.clone(),
        config.extraction.api_key.clone(),
        Some(config.extraction.timeout()),
    )?;
    let ai_provider = build_ai_provider(&config.ai.provider_settings())?;
    let options = config.generation.options();

    info!(
        extraction_base_url = %config.extraction.base_url,
        ai_provider = %config.ai.provider,
        extended_assets = options.extended_assets,
        "Application state built"
    );

    let pipeline = RepurposePipeline::new(Box::new(extractor), ai_provider, options);
    Ok(AppState::new(pipeline))
}

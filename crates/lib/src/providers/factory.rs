//! # AI Provider Factory
//!
//! Builds the configured AI provider. Living in the library lets the server and
//! the CLI share one construction path.

use crate::{
    errors::AiError,
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Fallback endpoint for the OpenAI-compatible provider.
pub const DEFAULT_LOCAL_API_URL: &str = "http://localhost:1234/v1/chat/completions";

#[derive(Error, Debug)]
pub enum ProviderBuildError {
    #[error("Unsupported AI provider type '{0}'")]
    Unsupported(String),
    #[error("api_key is required for the gemini provider")]
    MissingApiKey,
    #[error(transparent)]
    Client(#[from] AiError),
}

/// Everything needed to construct an AI provider.
#[derive(Debug, Clone)]
pub struct AiProviderSettings {
    /// The type of provider ("local" or "gemini").
    pub provider: String,
    /// The API URL. Derived from the model name for Gemini when absent.
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model_name: String,
    pub timeout: Option<Duration>,
}

/// Instantiates the provider described by `settings`.
pub fn build_ai_provider(
    settings: &AiProviderSettings,
) -> Result<Box<dyn AiProvider>, ProviderBuildError> {
    let provider: Box<dyn AiProvider> = match settings.provider.as_str() {
        "gemini" => {
            let api_key = settings
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or(ProviderBuildError::MissingApiKey)?;
            let api_url = settings
                .api_url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| GeminiProvider::endpoint_for_model(&settings.model_name));
            info!(api_url = %api_url, "Configuring Gemini provider");
            Box::new(GeminiProvider::new(api_url, api_key, settings.timeout)?)
        }
        "local" => {
            let api_url = settings
                .api_url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCAL_API_URL.to_string());
            info!(api_url = %api_url, model = %settings.model_name, "Configuring OpenAI-compatible provider");
            Box::new(LocalAiProvider::new(
                api_url,
                settings.api_key.clone().filter(|k| !k.is_empty()),
                Some(settings.model_name.clone()),
                settings.timeout,
            )?)
        }
        other => return Err(ProviderBuildError::Unsupported(other.to_string())),
    };
    Ok(provider)
}

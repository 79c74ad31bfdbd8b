//! # Application Configuration
//!
//! Loads [`AppConfig`] in layers, each overriding the previous one:
//!
//! 1. Programmatic defaults.
//! 2. An optional YAML file (`config.yml` next to this crate, or an explicit
//!    path), with `${VAR}` placeholders substituted from the environment.
//! 3. Conventional environment variables such as `PORT` or `AI_API_KEY`.
//! 4. `REPURPOSE_`-prefixed variables for any nested key, e.g.
//!    `REPURPOSE_AI__TIMEOUT_SECS`.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use repurpose::providers::factory::AiProviderSettings;
use repurpose::GenerationOptions;
use serde::Deserialize;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    pub port: u16,
    pub extraction: ExtractionConfig,
    pub ai: AiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Settings for the Jina Reader extraction service.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// Settings for the AI provider.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// The type of provider ("local" or "gemini").
    pub provider: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenerationConfig {
    /// Also generate the newsletter, carousel and content score.
    #[serde(default)]
    pub extended_assets: bool,
}

impl ExtractionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AiConfig {
    pub fn provider_settings(&self) -> AiProviderSettings {
        AiProviderSettings {
            provider: self.provider.clone(),
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            model_name: self.model_name.clone(),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
        }
    }
}

impl GenerationConfig {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            extended_assets: self.extended_assets,
        }
    }
}

/// Plain environment variables and the key each one sets.
const ENV_ALIASES: [(&str, &str); 7] = [
    ("PORT", "port"),
    ("AI_PROVIDER", "ai.provider"),
    ("AI_API_URL", "ai.api_url"),
    ("AI_API_KEY", "ai.api_key"),
    ("AI_MODEL", "ai.model_name"),
    ("JINA_API_KEY", "extraction.api_key"),
    ("JINA_BASE_URL", "extraction.base_url"),
];

static ENV_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap());

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = ENV_PLACEHOLDER_RE.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from defaults, file and environment.
///
/// An explicit `config_path_override` must exist. Without it, `config.yml`
/// next to this crate is used when present and silently skipped otherwise.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("port", 9090)?
        .set_default("extraction.base_url", repurpose_web::DEFAULT_JINA_BASE_URL)?
        .set_default("extraction.timeout_secs", 30)?
        .set_default("ai.provider", "local")?
        .set_default("ai.model_name", "google/gemini-2.5-flash")?
        .set_default("ai.timeout_secs", 90)?
        .set_default("generation.extended_assets", false)?;

    // Layer 2: YAML file.
    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            if let Some(content) = read_and_substitute(&user_config_path)? {
                info!("Loading user-defined configuration from '{user_config_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    // Layer 3: Conventional env vars, collected into their own source so the
    // prefixed layer below can still override them.
    let mut aliases = ConfigBuilder::builder();
    for (var, key) in ENV_ALIASES {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                aliases = aliases.set_override(key, value)?;
            }
        }
    }
    builder = builder.add_source(aliases.build()?);

    let settings = builder
        // Layer 4: Prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("REPURPOSE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Empty strings from unset `${VAR}` placeholders mean "not configured".
    config.extraction.api_key = config.extraction.api_key.filter(|k| !k.is_empty());
    config.ai.api_key = config.ai.api_key.filter(|k| !k.is_empty());
    config.ai.api_url = config.ai.api_url.filter(|u| !u.is_empty());

    Ok(config)
}

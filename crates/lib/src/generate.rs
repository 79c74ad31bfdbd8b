//! # Generation Orchestrator
//!
//! Builds the prompts, forces one structured call on the AI provider and turns
//! the returned arguments into [`GeneratedAssets`]. Anything that does not parse
//! strictly, or that breaks the angle and hook coverage rules, is rejected as a
//! whole.

use crate::{
    constants::{MAX_PROMPT_CONTENT_CHARS, REPURPOSE_TOOL_NAME},
    errors::GenerationError,
    prompts::{build_system_prompt, build_user_prompt, repurpose::REPURPOSE_FUNCTION_DESCRIPTION},
    providers::ai::{AiProvider, StructuredRequest},
    schema::repurpose_tool_schema,
    types::{GeneratedAssets, HookType, LinkedinAngle, ToneOption},
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Knobs for a generation call that do not vary per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Request the newsletter, carousel and content score as well.
    pub extended_assets: bool,
}

/// Returns the first `max_chars` characters of `content`.
pub fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Runs one generation against `provider`.
pub async fn generate_assets(
    provider: &dyn AiProvider,
    content: &str,
    tone: ToneOption,
    options: &GenerationOptions,
) -> Result<GeneratedAssets, GenerationError> {
    let truncated = truncate_chars(content, MAX_PROMPT_CONTENT_CHARS);
    let system_prompt = build_system_prompt(tone);
    let user_prompt = build_user_prompt(truncated, options.extended_assets);
    let parameters = repurpose_tool_schema(options.extended_assets);

    info!(
        tone = %tone,
        content_chars = truncated.chars().count(),
        extended = options.extended_assets,
        "Requesting structured generation"
    );

    let request = StructuredRequest {
        system_prompt: &system_prompt,
        user_prompt: &user_prompt,
        function_name: REPURPOSE_TOOL_NAME,
        function_description: REPURPOSE_FUNCTION_DESCRIPTION,
        parameters: &parameters,
    };
    let arguments = provider.generate_structured(&request).await?;
    debug!(arguments_len = arguments.len(), "Received structured arguments");

    let assets: GeneratedAssets = serde_json::from_str(&arguments).inspect_err(|e| {
        warn!(error = %e, "Structured result failed to parse");
    })?;
    validate_assets(&assets, options)?;
    Ok(assets)
}

/// Enforces the invariants serde alone cannot express.
pub fn validate_assets(
    assets: &GeneratedAssets,
    options: &GenerationOptions,
) -> Result<(), GenerationError> {
    let angles: HashSet<LinkedinAngle> = assets.linkedin_posts.iter().map(|p| p.angle).collect();
    if assets.linkedin_posts.len() != LinkedinAngle::ALL.len() || angles.len() != LinkedinAngle::ALL.len()
    {
        return Err(GenerationError::SchemaViolation(format!(
            "expected one LinkedIn post per angle, got {}",
            assets.linkedin_posts.len()
        )));
    }

    let hooks: HashSet<HookType> = assets.twitter_hooks.iter().map(|h| h.hook_type).collect();
    if assets.twitter_hooks.len() != HookType::ALL.len() || hooks.len() != HookType::ALL.len() {
        return Err(GenerationError::SchemaViolation(format!(
            "expected one Twitter hook per type, got {}",
            assets.twitter_hooks.len()
        )));
    }

    let extended_present = [
        assets.email_newsletter.is_some(),
        assets.instagram_carousel.is_some(),
        assets.content_score.is_some(),
    ];
    if options.extended_assets {
        if extended_present.contains(&false) {
            return Err(GenerationError::SchemaViolation(
                "extended assets were requested but are missing".to_string(),
            ));
        }
    } else if extended_present.contains(&true) {
        return Err(GenerationError::SchemaViolation(
            "extended assets were returned without being requested".to_string(),
        ));
    }

    if let Some(carousel) = &assets.instagram_carousel {
        if carousel.slides.is_empty() {
            return Err(GenerationError::SchemaViolation(
                "carousel has no slides".to_string(),
            ));
        }
    }

    if let Some(score) = &assets.content_score {
        if [score.readability, score.engagement, score.seo_strength]
            .iter()
            .any(|s| *s > 100)
        {
            return Err(GenerationError::SchemaViolation(
                "content scores must be between 0 and 100".to_string(),
            ));
        }
    }

    Ok(())
}

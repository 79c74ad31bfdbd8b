//! Content acquisition: manual text wins over extraction.

use crate::{
    constants::MIN_CONTENT_CHARS,
    errors::AcquisitionError,
    providers::extract::ContentExtractor,
};
use tracing::{info, warn};
use url::Url;

/// Produces the text to repurpose for an already validated URL.
///
/// Non-empty `manual_text` is used (trimmed) once it passes the minimum length,
/// and extraction is never attempted. An empty string counts as absent.
pub async fn acquire_content(
    extractor: &dyn ContentExtractor,
    url: &Url,
    manual_text: Option<&str>,
) -> Result<String, AcquisitionError> {
    if let Some(text) = manual_text.filter(|t| !t.is_empty()) {
        let length = text.trim().chars().count();
        if length < MIN_CONTENT_CHARS {
            return Err(AcquisitionError::ManualTextTooShort {
                length,
                minimum: MIN_CONTENT_CHARS,
            });
        }
        info!(length, "Using manually supplied text");
        return Ok(text.trim().to_string());
    }

    let content = extractor.extract_markdown(url).await.inspect_err(|e| {
        warn!(url = %url, error = %e, "Extraction failed");
    })?;

    let length = content.trim().chars().count();
    if length < MIN_CONTENT_CHARS {
        warn!(url = %url, length, "Extracted content is too short");
        return Err(AcquisitionError::ExtractedContentTooShort {
            length,
            minimum: MIN_CONTENT_CHARS,
        });
    }
    info!(url = %url, length, "Extracted content");
    Ok(content)
}

//! # Error Taxonomy
//!
//! Each pipeline stage owns a `thiserror` enum for its failure domain. Every one
//! of them converts into [`PipelineError`], which resolves to exactly one
//! [`ErrorKind`] with a stable HTTP status and user-facing message. Raw transport
//! or parse details stay inside the source error and are only ever logged.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The fixed set of error kinds surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UrlTooLong,
    InvalidFormat,
    SchemeNotAllowed,
    PrivateHostBlocked,
    ManualTextTooShort,
    ExtractionFailed,
    RateLimit,
    Credits,
    AiGenerationFailed,
    ServerError,
}

impl ErrorKind {
    /// The wire identifier, as used in the `errorType` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UrlTooLong => "url_too_long",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::SchemeNotAllowed => "scheme_not_allowed",
            ErrorKind::PrivateHostBlocked => "private_host_blocked",
            ErrorKind::ManualTextTooShort => "manual_text_too_short",
            ErrorKind::ExtractionFailed => "extraction_failed",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Credits => "credits",
            ErrorKind::AiGenerationFailed => "ai_generation_failed",
            ErrorKind::ServerError => "server_error",
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::UrlTooLong
            | ErrorKind::InvalidFormat
            | ErrorKind::SchemeNotAllowed
            | ErrorKind::PrivateHostBlocked
            | ErrorKind::ManualTextTooShort => 400,
            ErrorKind::ExtractionFailed => 422,
            ErrorKind::RateLimit => 429,
            ErrorKind::Credits => 402,
            ErrorKind::AiGenerationFailed | ErrorKind::ServerError => 500,
        }
    }

    /// The user-facing message. Callers present it verbatim.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::UrlTooLong => "URL exceeds maximum length",
            ErrorKind::InvalidFormat => "Invalid URL format",
            ErrorKind::SchemeNotAllowed => "Only HTTP/HTTPS URLs are allowed",
            ErrorKind::PrivateHostBlocked => "Private or internal URLs are not allowed",
            ErrorKind::ManualTextTooShort => "Manual text must be at least 200 characters.",
            ErrorKind::ExtractionFailed => {
                "We couldn't read that URL automatically. The site might be blocking bots."
            }
            ErrorKind::RateLimit => "Rate limit reached. Please wait a moment before trying again.",
            ErrorKind::Credits => "AI credits exhausted. Please add funds.",
            ErrorKind::AiGenerationFailed => "AI generation failed. Please try again in a moment.",
            ErrorKind::ServerError => {
                "An error occurred while processing your request. Please try again."
            }
        }
    }

    /// Whether a caller should offer a retry affordance for this kind.
    ///
    /// Only the URL validation kinds describe permanently invalid input.
    pub fn is_retryable(self) -> bool {
        !matches!(
            self,
            ErrorKind::UrlTooLong
                | ErrorKind::InvalidFormat
                | ErrorKind::SchemeNotAllowed
                | ErrorKind::PrivateHostBlocked
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Stage errors ---

/// Rejections produced by the trust validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is {0} characters long, exceeding the limit")]
    UrlTooLong(usize),
    #[error("URL could not be parsed: {0}")]
    InvalidFormat(String),
    #[error("URL scheme '{0}' is not allowed")]
    SchemeNotAllowed(String),
    #[error("host '{0}' looks private or internal")]
    PrivateHostBlocked(String),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::UrlTooLong(_) => ErrorKind::UrlTooLong,
            ValidationError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            ValidationError::SchemeNotAllowed(_) => ErrorKind::SchemeNotAllowed,
            ValidationError::PrivateHostBlocked(_) => ErrorKind::PrivateHostBlocked,
        }
    }
}

/// Failures of the extraction collaborator.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to build extraction client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Extraction request failed: {0}")]
    Request(reqwest::Error),
    #[error("Extraction request timed out")]
    Timeout,
    #[error("Extraction service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractError::Timeout
        } else {
            ExtractError::Request(err)
        }
    }
}

/// Failures of the content acquisition controller.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Manual text has {length} characters, at least {minimum} are required")]
    ManualTextTooShort { length: usize, minimum: usize },
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),
    #[error("Extracted content has {length} characters, at least {minimum} are required")]
    ExtractedContentTooShort { length: usize, minimum: usize },
}

impl AcquisitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcquisitionError::ManualTextTooShort { .. } => ErrorKind::ManualTextTooShort,
            AcquisitionError::Extraction(_) | AcquisitionError::ExtractedContentTooShort { .. } => {
                ErrorKind::ExtractionFailed
            }
        }
    }
}

/// Failures of an AI provider call.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("AI provider request timed out")]
    Timeout,
    #[error("AI provider rate limit reached")]
    RateLimited,
    #[error("AI provider credits exhausted")]
    CreditsExhausted,
    #[error("AI provider returned status {status}: {body}")]
    AiApi { status: u16, body: String },
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider response did not contain a tool call")]
    MissingToolCall,
}

impl AiError {
    /// Maps a transport error, separating timeouts from other failures.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else {
            AiError::AiRequest(err)
        }
    }

    /// Maps a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => AiError::RateLimited,
            402 => AiError::CreditsExhausted,
            _ => AiError::AiApi { status, body },
        }
    }
}

/// Failures of the generation orchestrator.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("Structured result is not valid: {0}")]
    InvalidStructuredOutput(#[from] serde_json::Error),
    #[error("Structured result violates the schema: {0}")]
    SchemaViolation(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Ai(AiError::RateLimited) => ErrorKind::RateLimit,
            GenerationError::Ai(AiError::CreditsExhausted) => ErrorKind::Credits,
            _ => ErrorKind::AiGenerationFailed,
        }
    }
}

/// Failures of a history store backend.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("History store lock was poisoned")]
    Poisoned,
}

// --- Pipeline error ---

/// The single error type that leaves the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(e) => e.kind(),
            PipelineError::Acquisition(e) => e.kind(),
            PipelineError::Generation(e) => e.kind(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind().message()
    }

    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// The stable wire representation of this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::from_kind(self.kind())
    }
}

/// The JSON body returned for a failed pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error_type: ErrorKind,
}

/// The `error` code that tells clients to switch to manual paste.
pub const EXTRACTION_FAILED_CODE: &str = "EXTRACTION_FAILED";

impl ErrorResponse {
    pub fn from_kind(kind: ErrorKind) -> Self {
        let error = match kind {
            ErrorKind::ExtractionFailed => EXTRACTION_FAILED_CODE.to_string(),
            other => other.message().to_string(),
        };
        Self {
            error,
            message: Some(kind.message().to_string()),
            error_type: kind,
        }
    }
}

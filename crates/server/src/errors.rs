use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use repurpose::{ErrorKind, ErrorResponse, PipelineError};
use std::any::Any;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Every variant renders as the same `{ error, message, errorType }` body the
/// pipeline defines, so clients only ever see the fixed set of error kinds.
pub enum AppError {
    /// Errors originating from the repurposing pipeline.
    Pipeline(PipelineError),
    /// The request body was not a valid repurpose request.
    InvalidRequest(String),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Pipeline(err) => err.kind(),
            AppError::InvalidRequest(_) => ErrorKind::InvalidFormat,
        }
    }
}

fn error_response(kind: ErrorKind) -> Response {
    let status_code =
        StatusCode::from_u16(kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status_code, Json(ErrorResponse::from_kind(kind))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // The pipeline already logged the failure with its source chain.
            AppError::Pipeline(_) => {}
            AppError::InvalidRequest(reason) => warn!("Rejected malformed request: {reason}"),
        }
        error_response(self.kind())
    }
}

/// Renders a panic anywhere below the router as a `server_error` response.
///
/// The panic payload is logged and never sent to the client.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "Request handler panicked");
    error_response(ErrorKind::ServerError)
}

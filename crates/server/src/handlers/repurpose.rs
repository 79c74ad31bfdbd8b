use super::{AppError, AppState};
use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};
use repurpose::{RepurposedContent, SourceRequest};
use tracing::info;

/// The handler for `POST /repurpose`.
///
/// The body is parsed by hand so malformed JSON, and bodies over the size
/// limit, get the same error shape as every other failure instead of axum's
/// plain-text rejection.
pub async fn repurpose_handler(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RepurposedContent>, AppError> {
    let body = body.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let request: SourceRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    info!(
        url = %request.url,
        tone = %request.tone,
        manual = request.manual_text.as_deref().is_some_and(|t| !t.is_empty()),
        "Received repurpose request"
    );

    let content = app_state.pipeline.run(&request).await?;
    Ok(Json(content))
}

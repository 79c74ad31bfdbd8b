use super::{errors::panic_response, handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Pasted articles can be long; anything beyond this is not a blog post.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/repurpose",
            post(handlers::repurpose_handler).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

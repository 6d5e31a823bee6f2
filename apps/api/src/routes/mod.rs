pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(analyze::handle_landing))
        .route("/health", get(health::health_handler))
        .route("/analyze", post(analyze::handle_analyze_page))
        .route("/api/v1/analyze", post(analyze::handle_analyze_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

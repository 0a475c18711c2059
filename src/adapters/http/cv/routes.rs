//! HTTP routes for CV endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{generate_cv, preview_cv, CvHandlers};

/// Mounted under `/api/cv`.
pub fn cv_routes(handlers: CvHandlers) -> Router {
    Router::new()
        .route("/generate/:session_id", post(generate_cv))
        .route("/preview/:session_id", get(preview_cv))
        .with_state(handlers)
}

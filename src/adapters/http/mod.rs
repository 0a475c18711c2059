//! HTTP adapters - REST API implementations.
//!
//! - `chat` - `/api/chat/*` session start, turns and history
//! - `cv` - `/api/cv/*` document generation and preview

pub mod chat;
pub mod cv;
mod error;

use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

pub use chat::{chat_routes, ChatHandlers};
pub use cv::{cv_routes, CvHandlers};
pub use error::{ErrorResponse, RETRY_MESSAGE};

/// Composes the full API with tracing, CORS and the request timeout.
///
/// The timeout is the only bound on oracle calls and renders.
pub fn app_router(chat: ChatHandlers, cv: CvHandlers, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/chat", chat_routes(chat))
        .nest("/api/cv", cv_routes(cv))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

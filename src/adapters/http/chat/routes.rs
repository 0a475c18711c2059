//! HTTP routes for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_history, send_message, start_session, ChatHandlers};

/// Mounted under `/api/chat`.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/start", post(start_session))
        .route("/message", post(send_message))
        .route("/history/:session_id", get(get_history))
        .with_state(handlers)
}

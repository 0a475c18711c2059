//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{session_error_response, ErrorResponse};
use crate::application::handlers::chat::{
    GetHistoryHandler, SendMessageCommand, SendMessageHandler, StartSessionHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::ChatMessage;

use super::dto::{HistoryResponse, SendMessageRequest, SendMessageResponse, StartSessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatHandlers {
    start_handler: Arc<StartSessionHandler>,
    send_handler: Arc<SendMessageHandler>,
    history_handler: Arc<GetHistoryHandler>,
}

impl ChatHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        send_handler: Arc<SendMessageHandler>,
        history_handler: Arc<GetHistoryHandler>,
    ) -> Self {
        Self {
            start_handler,
            send_handler,
            history_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/start
pub async fn start_session(State(handlers): State<ChatHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(result) => {
            let response = StartSessionResponse {
                session_id: result.session.id().to_string(),
                first_assistant_message: result
                    .session
                    .messages()
                    .first()
                    .cloned()
                    .unwrap_or_else(|| ChatMessage::assistant(result.greeting)),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// POST /api/chat/message
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let (Some(session_id), Some(message)) = (req.session_id, req.message) else {
        return ErrorResponse::bad_request("Session ID and message are required")
            .into_response_with(StatusCode::BAD_REQUEST);
    };
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return ErrorResponse::session_not_found().into_response_with(StatusCode::NOT_FOUND);
    };

    let cmd = SendMessageCommand {
        session_id,
        message,
    };

    match handlers.send_handler.handle(cmd).await {
        Ok(result) => {
            let assistant_message = result
                .session
                .messages()
                .last()
                .cloned()
                .unwrap_or_else(|| ChatMessage::assistant(result.reply));
            let response = SendMessageResponse {
                assistant_message,
                accumulated_profile: result.session.profile().clone(),
                stage: result.session.stage(),
                is_complete: result.session.is_complete(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// GET /api/chat/history/:session_id
pub async fn get_history(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return ErrorResponse::session_not_found().into_response_with(StatusCode::NOT_FOUND);
    };

    match handlers.history_handler.handle(session_id).await {
        Ok(session) => (StatusCode::OK, Json(HistoryResponse::from(session))).into_response(),
        Err(e) => session_error_response(e),
    }
}

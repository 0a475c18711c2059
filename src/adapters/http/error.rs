//! Error bodies and use-case error to status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::document::DocumentError;
use crate::domain::session::SessionError;

/// Shown to the user when the assistant could not process a turn.
pub const RETRY_MESSAGE: &str =
    "Sorry, I had trouble processing that. Please try sending your message again.";

/// JSON error body: `{code, message}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn session_not_found() -> Self {
        Self::new("SESSION_NOT_FOUND", "Session not found")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn session_error_response(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(_) => {
            ErrorResponse::session_not_found().into_response_with(StatusCode::NOT_FOUND)
        }
        SessionError::ValidationFailed { message, .. } => {
            ErrorResponse::bad_request(message).into_response_with(StatusCode::BAD_REQUEST)
        }
        SessionError::OracleFailure(_) => ErrorResponse::new("ASSISTANT_UNAVAILABLE", RETRY_MESSAGE)
            .into_response_with(StatusCode::SERVICE_UNAVAILABLE),
        SessionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "chat request failed");
            ErrorResponse::internal("Failed to process request")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn document_error_response(error: DocumentError) -> Response {
    match error {
        DocumentError::SessionNotFound(_) => {
            ErrorResponse::session_not_found().into_response_with(StatusCode::NOT_FOUND)
        }
        err @ DocumentError::NoProfileData(_) => {
            ErrorResponse::new("NO_PROFILE_DATA", err.message())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        DocumentError::RenderFailed(msg) => {
            tracing::error!(error = %msg, "CV rendering failed");
            ErrorResponse::new("RENDER_FAILED", "Failed to generate CV")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        DocumentError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "CV request failed");
            ErrorResponse::internal("Failed to process request")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    #[test]
    fn session_errors_map_to_statuses() {
        let cases = [
            (SessionError::not_found(SessionId::new()), StatusCode::NOT_FOUND),
            (SessionError::validation("message", "required"), StatusCode::BAD_REQUEST),
            (SessionError::oracle("timeout"), StatusCode::SERVICE_UNAVAILABLE),
            (SessionError::infrastructure("db down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(session_error_response(error).status(), status);
        }
    }

    #[test]
    fn document_errors_map_to_statuses() {
        assert_eq!(
            document_error_response(DocumentError::session_not_found(SessionId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            document_error_response(DocumentError::render_failed("crash")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            document_error_response(DocumentError::no_profile_data(SessionId::new())).status(),
            StatusCode::BAD_REQUEST
        );
    }
}

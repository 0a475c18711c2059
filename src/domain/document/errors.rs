//! Document generation error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Errors raised by the document use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// No user or chat session for the id.
    SessionNotFound(SessionId),
    /// The conversation has not produced any profile data yet.
    NoProfileData(SessionId),
    /// The rendering engine failed; no partial document is produced.
    RenderFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl DocumentError {
    pub fn session_not_found(id: SessionId) -> Self {
        DocumentError::SessionNotFound(id)
    }
    pub fn no_profile_data(id: SessionId) -> Self {
        DocumentError::NoProfileData(id)
    }
    pub fn render_failed(message: impl Into<String>) -> Self {
        DocumentError::RenderFailed(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        DocumentError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            DocumentError::NoProfileData(_) => ErrorCode::ValidationFailed,
            DocumentError::RenderFailed(_) => ErrorCode::RenderFailed,
            DocumentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            DocumentError::SessionNotFound(id) => format!("Session not found: {}", id),
            DocumentError::NoProfileData(_) => {
                "No CV data found. Please complete the chat first.".to_string()
            }
            DocumentError::RenderFailed(msg) => format!("Failed to generate CV: {}", msg),
            DocumentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DocumentError {}

impl From<DomainError> for DocumentError {
    fn from(err: DomainError) -> Self {
        DocumentError::Infrastructure(err.to_string())
    }
}

//! GetHistoryHandler - Query handler for a chat transcript.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{ChatSession, SessionError};
use crate::ports::ChatSessionRepository;

pub struct GetHistoryHandler {
    chats: Arc<dyn ChatSessionRepository>,
}

impl GetHistoryHandler {
    pub fn new(chats: Arc<dyn ChatSessionRepository>) -> Self {
        Self { chats }
    }

    /// Returns the most recent chat session for the id.
    pub async fn handle(&self, session_id: SessionId) -> Result<ChatSession, SessionError> {
        self.chats
            .find_latest_by_session(&session_id)
            .await?
            .ok_or(SessionError::not_found(session_id))
    }
}

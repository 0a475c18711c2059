//! StartSessionHandler - Command handler for opening a new chat.

use std::sync::Arc;

use crate::domain::document::UserRecord;
use crate::domain::foundation::SessionId;
use crate::domain::session::{ChatSession, SessionError};
use crate::ports::{ChatSessionRepository, UserRepository};

/// Result of a started session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: ChatSession,
    /// First assistant message of the conversation.
    pub greeting: String,
}

/// Creates the user record and the chat session for a fresh session id.
pub struct StartSessionHandler {
    users: Arc<dyn UserRepository>,
    chats: Arc<dyn ChatSessionRepository>,
}

impl StartSessionHandler {
    pub fn new(users: Arc<dyn UserRepository>, chats: Arc<dyn ChatSessionRepository>) -> Self {
        Self { users, chats }
    }

    pub async fn handle(&self) -> Result<StartSessionResult, SessionError> {
        let session_id = SessionId::new();

        let user = UserRecord::new(session_id);
        self.users.create(&user).await?;

        let session = ChatSession::start(session_id, user.id);
        self.chats.create(&session).await?;

        tracing::info!(session_id = %session_id, user_id = %user.id, "chat session started");

        let greeting = session.last_assistant_message().unwrap_or_default().to_string();
        Ok(StartSessionResult { session, greeting })
    }
}

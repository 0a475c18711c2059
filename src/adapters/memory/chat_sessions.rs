//! In-memory ChatSessionRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::ChatSession;
use crate::ports::ChatSessionRepository;

/// Keeps every chat session created for a session id, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Vec<ChatSession>>>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .entry(*session.id())
            .or_default()
            .push(session.clone());
        Ok(())
    }

    async fn find_latest_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<ChatSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).and_then(|all| all.last()).cloned())
    }

    async fn save(&self, session: &ChatSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let latest = sessions
            .get_mut(session.id())
            .and_then(|all| all.last_mut())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Chat session not found: {}", session.id()),
                )
            })?;
        *latest = session.clone();
        Ok(())
    }
}

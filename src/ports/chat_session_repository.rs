//! Chat session repository port.
//!
//! Stores the [`ChatSession`] aggregate: message log, stage, accumulated
//! profile and completion flag.
//!
//! Saves are last-writer-wins; concurrent turns on one session are not
//! coordinated.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::ChatSession;

#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    /// Save a new chat session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &ChatSession) -> Result<(), DomainError>;

    /// Most recent chat session for a session id.
    ///
    /// Returns `None` if not found.
    async fn find_latest_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<ChatSession>, DomainError>;

    /// Persist the current state of an existing chat session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError>;
}

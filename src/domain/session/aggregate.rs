//! Chat session aggregate.
//!
//! A chat session is the conversation log plus everything extracted from it.
//! It belongs to exactly one user and is keyed by the session id handed to
//! the client at start.
//!
//! # Concurrency
//!
//! One in-flight message per session is assumed. Two concurrent turns on the
//! same session are not coordinated and the last save wins.

use serde::{Deserialize, Serialize};

use super::advancer::{StageDecision, GREETING};
use super::{ChatMessage, Stage};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::profile::{merge, Profile, ProfileFragment};

/// Chat session aggregate.
///
/// # Invariants
///
/// - `messages` is append-only and starts with the assistant greeting
/// - `profile` only grows through [`ChatSession::absorb`]
/// - `is_complete` implies `stage == Stage::Review`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    id: SessionId,
    user_id: UserId,
    messages: Vec<ChatMessage>,
    stage: Stage,
    profile: Profile,
    is_complete: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ChatSession {
    /// Opens a new session with the greeting already in the log.
    pub fn start(id: SessionId, user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            messages: vec![ChatMessage::assistant(GREETING)],
            stage: Stage::default(),
            profile: Profile::default(),
            is_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        user_id: UserId,
        messages: Vec<ChatMessage>,
        stage: Stage,
        profile: Profile,
        is_complete: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            messages,
            stage,
            profile,
            is_complete,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Text of the most recent assistant message, if any.
    pub fn last_assistant_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == super::MessageRole::Assistant)
            .map(|m| m.content.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn record_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
        self.touch();
    }

    pub fn record_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
        self.touch();
    }

    /// Merges an extraction result into the accumulated profile.
    pub fn absorb(&mut self, fragment: ProfileFragment) {
        if fragment.is_empty() {
            return;
        }
        self.profile = merge(&self.profile, fragment);
        self.touch();
    }

    /// Moves the session to the decided stage.
    pub fn apply(&mut self, decision: &StageDecision) {
        self.stage = decision.stage;
        self.is_complete = decision.is_complete;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

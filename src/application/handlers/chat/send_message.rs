//! SendMessageHandler - Command handler for one conversational turn.
//!
//! A turn records the user's message, extracts what it says, folds that into
//! the accumulated profile, decides the next stage and replies. Syncing the
//! persisted user/profile records is best effort and never fails the turn.

use std::sync::Arc;

use crate::domain::document::{PersistedProfile, UserRecord};
use crate::domain::foundation::SessionId;
use crate::domain::profile::Profile;
use crate::domain::session::{ChatSession, SessionError, StepAdvancer};
use crate::ports::{
    ChatSessionRepository, ExtractionOracle, OracleError, ProfileRepository, UserRepository,
};

/// Command for one user message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub message: String,
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub reply: String,
    /// Session state after the turn.
    pub session: ChatSession,
}

pub struct SendMessageHandler {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    chats: Arc<dyn ChatSessionRepository>,
    oracle: Arc<dyn ExtractionOracle>,
}

impl SendMessageHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        chats: Arc<dyn ChatSessionRepository>,
        oracle: Arc<dyn ExtractionOracle>,
    ) -> Self {
        Self {
            users,
            profiles,
            chats,
            oracle,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, SessionError> {
        // 1. Validate before touching anything
        if cmd.message.trim().is_empty() {
            return Err(SessionError::validation("message", "Message is required"));
        }

        // 2. Load user and session
        let user = self
            .users
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or(SessionError::not_found(cmd.session_id))?;
        let mut session = self
            .chats
            .find_latest_by_session(&cmd.session_id)
            .await?
            .ok_or(SessionError::not_found(cmd.session_id))?;

        session.record_user_message(cmd.message.as_str());

        // 3. Extract and merge
        let fragment = match self.oracle.extract(&cmd.message).await {
            Ok(fragment) => fragment,
            Err(err) => return Err(self.abort_turn(&session, "extract", err).await),
        };
        session.absorb(fragment);

        // 4. Mirror scalars into the persisted records
        self.sync_records(&user, session.profile()).await;

        // 5. Decide the stage, then ask the oracle for wording
        let decision = StepAdvancer::evaluate(session.profile());
        let prompt = match self.oracle.next_prompt(session.profile(), decision.stage).await {
            Ok(prompt) => prompt,
            Err(err) => return Err(self.abort_turn(&session, "next_prompt", err).await),
        };

        if prompt.next_stage.is_some_and(|stage| stage != decision.stage)
            || prompt.is_complete != decision.is_complete
        {
            tracing::debug!(
                session_id = %cmd.session_id,
                decided = %decision.stage,
                suggested = ?prompt.next_stage,
                "oracle stage suggestion overridden"
            );
        }

        session.apply(&decision);
        let reply = StepAdvancer::compose_reply(&decision, &prompt);
        session.record_assistant_message(reply.as_str());

        // 6. Persist the turn
        self.chats.save(&session).await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            stage = %decision.stage,
            complete = decision.is_complete,
            "turn completed"
        );

        Ok(SendMessageResult { reply, session })
    }

    /// Keeps the user's message, then reports the oracle failure.
    async fn abort_turn(
        &self,
        session: &ChatSession,
        operation: &'static str,
        err: OracleError,
    ) -> SessionError {
        tracing::warn!(
            session_id = %session.id(),
            operation,
            error = %err,
            "oracle call failed, turn aborted"
        );

        if let Err(save_err) = self.chats.save(session).await {
            tracing::warn!(
                session_id = %session.id(),
                error = %save_err,
                "failed to keep user message after oracle failure"
            );
        }

        SessionError::oracle(err.to_string())
    }

    async fn sync_records(&self, user: &UserRecord, profile: &Profile) {
        if let Some(personal) = profile.personal_info.as_ref().filter(|p| !p.is_empty()) {
            if let Err(err) = self.users.update_personal_info(&user.id, personal).await {
                tracing::warn!(
                    session_id = %user.session_id,
                    error = %err,
                    "failed to update user personal info"
                );
            }
        }

        let Some(work) = profile.work_info.as_ref().filter(|w| !w.is_empty()) else {
            return;
        };

        let result = match self.profiles.find_by_user(&user.id).await {
            Ok(Some(existing)) => self.profiles.update_work_info(&existing.id, work).await,
            Ok(None) => {
                let fresh = PersistedProfile {
                    work_info: work.clone(),
                    ..PersistedProfile::new(user.id)
                };
                self.profiles.create(&fresh).await
            }
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            tracing::warn!(
                session_id = %user.session_id,
                error = %err,
                "failed to update profile work info"
            );
        }
    }
}

//! PreviewDocumentHandler - read-only view of what a render would contain.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::document::{DocumentError, DocumentModel};
use crate::domain::foundation::SessionId;
use crate::domain::profile::{PersonalInfo, Profile};
use crate::ports::{ChatSessionRepository, UserRepository};

use super::ProfileAssembler;

/// The stored personal info, the assembled model and the raw conversation
/// profile, side by side.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPreview {
    pub personal_info: PersonalInfo,
    pub model: DocumentModel,
    pub accumulated: Profile,
}

pub struct PreviewDocumentHandler {
    users: Arc<dyn UserRepository>,
    chats: Arc<dyn ChatSessionRepository>,
    assembler: Arc<ProfileAssembler>,
}

impl PreviewDocumentHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        chats: Arc<dyn ChatSessionRepository>,
        assembler: Arc<ProfileAssembler>,
    ) -> Self {
        Self {
            users,
            chats,
            assembler,
        }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<DocumentPreview, DocumentError> {
        let user = self
            .users
            .find_by_session(&session_id)
            .await?
            .ok_or(DocumentError::session_not_found(session_id))?;
        let chat = self
            .chats
            .find_latest_by_session(&session_id)
            .await?
            .ok_or(DocumentError::session_not_found(session_id))?;

        let model = self.assembler.snapshot(&user, chat.profile()).await?;

        Ok(DocumentPreview {
            personal_info: user.personal,
            model,
            accumulated: chat.profile().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryChatSessionRepository, InMemoryProfileRepository, InMemoryUserRepository,
    };
    use crate::adapters::oracle::RuleBasedOracle;
    use crate::domain::document::UserRecord;
    use crate::domain::profile::{ProfileFragment, WorkInfo};
    use crate::domain::session::ChatSession;

    #[tokio::test]
    async fn preview_reflects_conversation_without_writing() {
        let users = InMemoryUserRepository::new();
        let profiles = InMemoryProfileRepository::new();
        let chats = InMemoryChatSessionRepository::new();

        let user = UserRecord::new(SessionId::new());
        users.create(&user).await.unwrap();
        let mut chat = ChatSession::start(user.session_id, user.id);
        chat.absorb(ProfileFragment {
            work_info: Some(WorkInfo {
                target_position: Some("Electrician".to_string()),
                ..WorkInfo::default()
            }),
            ..ProfileFragment::default()
        });
        chats.create(&chat).await.unwrap();

        let users: Arc<dyn UserRepository> = Arc::new(users);
        let assembler = ProfileAssembler::new(
            users.clone(),
            Arc::new(profiles.clone()),
            Arc::new(RuleBasedOracle::new()),
        );
        let handler = PreviewDocumentHandler::new(users, Arc::new(chats), Arc::new(assembler));

        let preview = handler.handle(user.session_id).await.unwrap();

        assert_eq!(
            preview.model.work_info.target_position.as_deref(),
            Some("Electrician")
        );
        assert_eq!(
            preview
                .accumulated
                .work_info
                .as_ref()
                .and_then(|w| w.target_position.as_deref()),
            Some("Electrician")
        );
        assert!(preview.personal_info.is_empty());
        assert_eq!(profiles.count().await, 0);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let assembler = ProfileAssembler::new(
            users.clone(),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(RuleBasedOracle::new()),
        );
        let handler = PreviewDocumentHandler::new(
            users,
            Arc::new(InMemoryChatSessionRepository::new()),
            Arc::new(assembler),
        );

        let err = handler.handle(SessionId::new()).await.unwrap_err();
        assert!(matches!(err, DocumentError::SessionNotFound(_)));
    }
}

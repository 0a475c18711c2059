//! GenerateDocumentHandler - renders the CV for a chat session.

use std::sync::Arc;

use crate::domain::document::{document_filename, DocumentError};
use crate::domain::foundation::SessionId;
use crate::ports::{ChatSessionRepository, UserRepository};

use super::{DocumentRenderer, ProfileAssembler};

/// A rendered CV ready to be served as an attachment.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct GenerateDocumentHandler {
    users: Arc<dyn UserRepository>,
    chats: Arc<dyn ChatSessionRepository>,
    assembler: Arc<ProfileAssembler>,
    renderer: Arc<DocumentRenderer>,
}

impl GenerateDocumentHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        chats: Arc<dyn ChatSessionRepository>,
        assembler: Arc<ProfileAssembler>,
        renderer: Arc<DocumentRenderer>,
    ) -> Self {
        Self {
            users,
            chats,
            assembler,
            renderer,
        }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<GeneratedDocument, DocumentError> {
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

        if chat.profile().is_empty() {
            return Err(DocumentError::no_profile_data(session_id));
        }

        let model = self.assembler.assemble(&user, chat.profile()).await?;
        let bytes = self.renderer.render(&model).await?;
        let filename = document_filename(&model.personal);

        tracing::info!(
            session_id = %session_id,
            filename = %filename,
            bytes = bytes.len(),
            "CV generated"
        );

        Ok(GeneratedDocument { filename, bytes })
    }
}

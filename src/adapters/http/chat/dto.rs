//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::profile::Profile;
use crate::domain::session::{ChatMessage, ChatSession, Stage};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Both fields are optional at the wire level so a missing one is a 400,
/// not a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, alias = "text")]
    pub message: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub first_assistant_message: ChatMessage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub assistant_message: ChatMessage,
    pub accumulated_profile: Profile,
    pub stage: Stage,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
    pub accumulated_profile: Profile,
    pub stage: Stage,
    pub is_complete: bool,
}

impl From<ChatSession> for HistoryResponse {
    fn from(session: ChatSession) -> Self {
        Self {
            messages: session.messages().to_vec(),
            accumulated_profile: session.profile().clone(),
            stage: session.stage(),
            is_complete: session.is_complete(),
        }
    }
}

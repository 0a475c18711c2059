//! HTTP DTOs for CV endpoints.

use serde::Serialize;

use crate::application::handlers::document::DocumentPreview;
use crate::domain::document::DocumentModel;
use crate::domain::profile::{PersonalInfo, Profile};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub personal_info: PersonalInfo,
    pub document_model: DocumentModel,
    pub accumulated_profile: Profile,
}

impl From<DocumentPreview> for PreviewResponse {
    fn from(preview: DocumentPreview) -> Self {
        Self {
            personal_info: preview.personal_info,
            document_model: preview.model,
            accumulated_profile: preview.accumulated,
        }
    }
}

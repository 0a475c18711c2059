//! Render-ready document model and the section precedence rule.

use serde::{Deserialize, Serialize};

use super::records::{PersistedProfile, UserRecord};
use crate::domain::profile::{
    non_blank, Certification, Education, Language, PersonalInfo, Profile, Skill, WorkExperience,
    WorkInfo,
};

/// Reconciled profile, built fresh for every render and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub personal: PersonalInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub work_info: WorkInfo,
    pub skills: Vec<Skill>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
}

/// Builds the document model.
///
/// Each section is taken from the persisted records when they hold anything
/// for it, otherwise from the accumulated profile. Sections are decided
/// independently, so a document may mix both sources.
pub fn assemble(
    persisted: Option<&PersistedProfile>,
    user: Option<&UserRecord>,
    accumulated: &Profile,
) -> DocumentModel {
    let personal = match user {
        Some(user) if !user.personal.is_empty() => user.personal.clone(),
        _ => accumulated.personal_info.clone().unwrap_or_default(),
    };

    let work_info = match persisted {
        Some(p) if !p.work_info.is_empty() => p.work_info.clone(),
        _ => accumulated.work_info.clone().unwrap_or_default(),
    };

    let summary = persisted
        .and_then(|p| non_blank(&p.summary))
        .map(str::to_string);

    DocumentModel {
        personal,
        summary,
        work_info,
        skills: prefer(persisted.map(|p| &p.skills), &accumulated.skills),
        work_experience: prefer(
            persisted.map(|p| &p.work_experience),
            &accumulated.work_experience,
        ),
        education: prefer(persisted.map(|p| &p.education), &accumulated.education),
        languages: prefer(persisted.map(|p| &p.languages), &accumulated.languages),
        certifications: prefer(
            persisted.map(|p| &p.certifications),
            &accumulated.certifications,
        ),
    }
}

fn prefer<T: Clone>(persisted: Option<&Vec<T>>, accumulated: &[T]) -> Vec<T> {
    match persisted {
        Some(rows) if !rows.is_empty() => rows.clone(),
        _ => accumulated.to_vec(),
    }
}

/// Download name for a rendered CV, e.g. `CV_John_Smith.pdf`.
pub fn document_filename(personal: &PersonalInfo) -> String {
    let parts: Vec<String> = [non_blank(&personal.first_name), non_blank(&personal.last_name)]
        .into_iter()
        .flatten()
        .map(|part| {
            part.chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect()
        })
        .collect();

    if parts.is_empty() {
        "CV.pdf".to_string()
    } else {
        format!("CV_{}.pdf", parts.join("_"))
    }
}

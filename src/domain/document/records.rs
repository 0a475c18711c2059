//! Persisted record shapes.
//!
//! These mirror the accumulated profile but are owned by the persistence
//! layer: one row per user, one profile per user, one row per collection
//! entry. They can be edited independently of the conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, SessionId, Timestamp, UserId};
use crate::domain::profile::{
    Certification, Education, Language, PersonalInfo, Profile, Skill, SkillCategory,
    WorkExperience, WorkInfo,
};

/// A user, created when a chat session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub session_id: SessionId,
    pub personal: PersonalInfo,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    pub fn new(session_id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            session_id,
            personal: PersonalInfo::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    InProgress,
    Completed,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::InProgress => "in_progress",
            CompletionStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => CompletionStatus::Completed,
            _ => CompletionStatus::InProgress,
        }
    }
}

/// The authoritative CV profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProfile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub summary: Option<String>,
    pub work_info: WorkInfo,
    pub skills: Vec<Skill>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub completion_status: CompletionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PersistedProfile {
    /// Empty in-progress profile for a user.
    pub fn new(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id: ProfileId::new(),
            user_id,
            summary: None,
            work_info: WorkInfo::default(),
            skills: Vec::new(),
            work_experience: Vec::new(),
            education: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
            completion_status: CompletionStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }

    /// Profile materialized from a finished conversation.
    ///
    /// Skills without a category are filed as technical and the two
    /// yes/no answers default to `false`.
    pub fn seeded_from(user_id: UserId, accumulated: &Profile) -> Self {
        let mut work_info = accumulated.work_info.clone().unwrap_or_default();
        work_info.driving_license.get_or_insert(false);
        work_info.willing_to_relocate.get_or_insert(false);

        let skills = accumulated
            .skills
            .iter()
            .cloned()
            .map(|mut skill| {
                skill.category.get_or_insert(SkillCategory::Technical);
                skill
            })
            .collect();

        Self {
            work_info,
            skills,
            work_experience: accumulated.work_experience.clone(),
            education: accumulated.education.clone(),
            languages: accumulated.languages.clone(),
            certifications: accumulated.certifications.clone(),
            completion_status: CompletionStatus::Completed,
            ..Self::new(user_id)
        }
    }

    pub fn has_summary(&self) -> bool {
        self.summary
            .as_deref()
            .map_or(false, |s| !s.trim().is_empty())
    }
}

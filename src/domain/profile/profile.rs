//! Accumulated profile and the fragments that feed it.

use serde::{Deserialize, Serialize};

use super::sections::{
    non_blank, Certification, Education, Language, PersonalInfo, Skill, WorkExperience, WorkInfo,
};

/// Everything learned about the candidate during one conversation.
///
/// # Invariants
///
/// - Collection sections only ever grow within a session
/// - Absent scalar sections mean "nothing known yet", not "cleared"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_info: Option<WorkInfo>,
    pub skills: Vec<Skill>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
}

impl Profile {
    /// First name, when known and not blank.
    pub fn first_name(&self) -> Option<&str> {
        self.personal_info
            .as_ref()
            .and_then(|info| non_blank(&info.first_name))
    }

    /// True when no section carries any information.
    pub fn is_empty(&self) -> bool {
        self.personal_info.as_ref().map_or(true, PersonalInfo::is_empty)
            && self.work_info.as_ref().map_or(true, WorkInfo::is_empty)
            && self.skills.is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.languages.is_empty()
            && self.certifications.is_empty()
    }
}

/// Partial profile produced by a single extraction.
///
/// Same shape as [`Profile`]; every section is optional and an empty
/// fragment is a valid "nothing found" result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_info: Option<WorkInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<Skill>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
}

impl ProfileFragment {
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_none()
            && self.work_info.is_none()
            && self.skills.is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.languages.is_empty()
            && self.certifications.is_empty()
    }
}

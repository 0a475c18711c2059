//! Profile sections: scalar sub-objects and collection entries.
//!
//! Wire names follow the camelCase JSON contract shared with the extraction
//! oracle and the client (`firstName`, `jobTitle`, `isCurrentJob`, ...).
//! Aliases accept the shorter names as well.

use serde::{Deserialize, Serialize};

use super::values::{SkillCategory, SkillLevel, WorkPermitStatus};

/// Identity and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl PersonalInfo {
    /// True when no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.date_of_birth,
            &self.nationality,
            &self.address,
            &self.city,
            &self.country,
            &self.postal_code,
        ]
        .iter()
        .all(|field| non_blank(field).is_none())
    }

    /// "First Last", skipping whichever part is missing.
    pub fn full_name(&self) -> String {
        [non_blank(&self.first_name), non_blank(&self.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Job-search preferences and eligibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_job: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_expectation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_permit_status: Option<WorkPermitStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_license: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub willing_to_relocate: Option<bool>,
}

impl WorkInfo {
    /// True when nothing useful is set.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.target_position).is_none()
            && self.years_of_experience.is_none()
            && non_blank(&self.current_job).is_none()
            && non_blank(&self.industry).is_none()
            && non_blank(&self.availability_date).is_none()
            && non_blank(&self.salary_expectation).is_none()
            && self.work_permit_status.is_none()
            && self.driving_license.is_none()
            && self.willing_to_relocate.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
    #[serde(alias = "years", skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
}

impl Skill {
    /// Creates a skill with a name and category.
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: SkillLevel) -> Self {
        self.level = Some(level);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(rename = "jobTitle", alias = "title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "companyName", alias = "company", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "isCurrentJob", alias = "isCurrent")]
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
}

impl WorkExperience {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(rename = "institutionName", alias = "institution", skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "educationType", alias = "type", skip_serializing_if = "Option::is_none")]
    pub education_type: Option<String>,
}

// Education is assumed finished unless stated otherwise.
impl Default for Education {
    fn default() -> Self {
        Self {
            institution: None,
            degree: None,
            field_of_study: None,
            location: None,
            start_date: None,
            end_date: None,
            is_completed: true,
            grade: None,
            description: None,
            education_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(rename = "language", alias = "name")]
    pub name: String,
    #[serde(rename = "level", alias = "proficiency", skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<String>,
}

impl Language {
    pub fn new(name: impl Into<String>, proficiency: Option<&str>) -> Self {
        Self {
            name: name.into(),
            proficiency: proficiency.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_obtained: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

/// Returns the trimmed value when it is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn work_experience_reads_oracle_field_names() {
        let exp: WorkExperience = serde_json::from_value(json!({
            "jobTitle": "Welder",
            "companyName": "Acme Steel",
            "isCurrentJob": true,
            "responsibilities": ["MIG welding"]
        }))
        .unwrap();

        assert_eq!(exp.title.as_deref(), Some("Welder"));
        assert_eq!(exp.company.as_deref(), Some("Acme Steel"));
        assert!(exp.is_current);
        assert_eq!(exp.responsibilities, vec!["MIG welding".to_string()]);
        assert!(exp.achievements.is_empty());
    }

    #[test]
    fn work_experience_accepts_short_aliases() {
        let exp: WorkExperience =
            serde_json::from_value(json!({"title": "Driver", "company": "DHL", "isCurrent": true}))
                .unwrap();
        assert_eq!(exp.title.as_deref(), Some("Driver"));
        assert_eq!(exp.company.as_deref(), Some("DHL"));
        assert!(exp.is_current);
    }

    #[test]
    fn education_defaults_to_completed() {
        let edu: Education = serde_json::from_value(json!({"institutionName": "Trade School"})).unwrap();
        assert!(edu.is_completed);
    }

    #[test]
    fn language_uses_language_and_level_keys() {
        let lang: Language =
            serde_json::from_value(json!({"language": "Polish", "level": "native"})).unwrap();
        assert_eq!(lang.name, "Polish");
        assert_eq!(lang.proficiency.as_deref(), Some("native"));

        let out = serde_json::to_value(&lang).unwrap();
        assert_eq!(out, json!({"language": "Polish", "level": "native"}));
    }

    #[test]
    fn personal_info_emptiness_ignores_blank_strings() {
        let info = PersonalInfo {
            email: Some("   ".to_string()),
            ..PersonalInfo::default()
        };
        assert!(info.is_empty());
    }

    #[test]
    fn full_name_skips_missing_parts() {
        let info = PersonalInfo {
            first_name: Some("Ana".to_string()),
            ..PersonalInfo::default()
        };
        assert_eq!(info.full_name(), "Ana");
    }
}

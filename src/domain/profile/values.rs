//! Enumerated profile values.
//!
//! The extraction side is free text, so every enumeration here accepts any
//! string: known codes map to a variant, anything else is kept verbatim in
//! `Other` so that it can still be rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Unrecognized code, kept as received.
            Other(String),
        }

        impl $name {
            /// Wire code for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Other(code) => code.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.trim().to_ascii_lowercase().as_str() {
                    $($code => $name::$variant,)+
                    _ => $name::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lenient_enum!(
    /// Category a skill is filed under on the CV.
    SkillCategory {
        Technical => "technical",
        Soft => "soft",
        Language => "language",
        Certification => "certification",
        Equipment => "equipment",
        Safety => "safety",
    }
);

lenient_enum!(
    /// Self-assessed proficiency for a skill.
    SkillLevel {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
        Expert => "expert",
    }
);

lenient_enum!(
    /// Right-to-work status of the candidate.
    WorkPermitStatus {
        Citizen => "citizen",
        PermanentResident => "permanent_resident",
        WorkPermit => "work_permit",
        VisaRequired => "visa_required",
    }
);

impl WorkPermitStatus {
    /// Human readable label used on the CV. Unknown codes pass through.
    pub fn label(&self) -> &str {
        match self {
            WorkPermitStatus::Citizen => "EU Citizen",
            WorkPermitStatus::PermanentResident => "Permanent Resident",
            WorkPermitStatus::WorkPermit => "Work Permit Holder",
            WorkPermitStatus::VisaRequired => "Visa Required",
            WorkPermitStatus::Other(code) => code.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_variants() {
        assert_eq!(SkillCategory::from("technical"), SkillCategory::Technical);
        assert_eq!(SkillCategory::from(" Safety "), SkillCategory::Safety);
        assert_eq!(SkillLevel::from("EXPERT"), SkillLevel::Expert);
    }

    #[test]
    fn unknown_codes_are_kept_verbatim() {
        let category = SkillCategory::from("heavy_machinery");
        assert_eq!(category, SkillCategory::Other("heavy_machinery".to_string()));
        assert_eq!(category.as_str(), "heavy_machinery");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&SkillCategory::Equipment).unwrap();
        assert_eq!(json, "\"equipment\"");

        let parsed: SkillCategory = serde_json::from_str("\"soft\"").unwrap();
        assert_eq!(parsed, SkillCategory::Soft);
    }

    #[test]
    fn permit_labels_follow_fixed_table() {
        assert_eq!(WorkPermitStatus::from("citizen").label(), "EU Citizen");
        assert_eq!(
            WorkPermitStatus::from("permanent_resident").label(),
            "Permanent Resident"
        );
        assert_eq!(WorkPermitStatus::from("work_permit").label(), "Work Permit Holder");
        assert_eq!(WorkPermitStatus::from("visa_required").label(), "Visa Required");
        assert_eq!(WorkPermitStatus::from("blue_card").label(), "blue_card");
    }
}

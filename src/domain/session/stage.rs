//! Conversation stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of the profile the conversation is currently collecting.
///
/// Ordered by collection priority. The
/// [`StepAdvancer`](super::StepAdvancer) may jump forward or back depending
/// on what the profile already contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    PersonalInfo,
    WorkExperience,
    Skills,
    Education,
    Review,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::PersonalInfo,
        Stage::WorkExperience,
        Stage::Skills,
        Stage::Education,
        Stage::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PersonalInfo => "personal_info",
            Stage::WorkExperience => "work_experience",
            Stage::Skills => "skills",
            Stage::Education => "education",
            Stage::Review => "review",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s.trim())
            .ok_or_else(|| format!("unknown stage: {}", s))
    }
}

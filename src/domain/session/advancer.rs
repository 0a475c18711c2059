//! Stage selection and reply wording.
//!
//! The decision is recomputed from the profile on every turn and does not
//! depend on the path taken to get there. Priority order:
//!
//! 1. no first name      -> `personal_info`
//! 2. no work experience -> `work_experience`
//! 3. no skills          -> `skills`
//! 4. otherwise          -> `review`, complete

use serde::{Deserialize, Serialize};

use super::Stage;
use crate::domain::profile::Profile;

/// Opening line of every session.
pub const GREETING: &str = "Hello! I'm here to help you create a professional CV. \
Let's start by getting to know you better. Could you tell me your name and what kind of \
work you do or are looking for?";

/// Reply sent once the profile is complete.
pub const COMPLETION_MESSAGE: &str = "Great! I have all the information I need. \
Your CV is ready to be generated. Would you like me to create it now?";

/// Reply used when no follow-up question is available.
pub const FALLBACK_REPLY: &str =
    "Thank you for that information. Could you tell me more about your work experience?";

pub const ASK_FULL_NAME: &str = "What is your full name?";
pub const ASK_WORK_HISTORY: &str =
    "Could you tell me about your work experience? What jobs have you had?";
pub const ASK_SKILLS: &str = "What skills do you have? Any certifications or special training?";
pub const ASK_CONFIRMATION: &str =
    "Great! I have enough information to create your CV. Would you like me to generate it now?";

/// Most questions carried into a single reply.
pub const MAX_QUESTIONS: usize = 3;

/// Outcome of evaluating a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDecision {
    pub stage: Stage,
    pub is_complete: bool,
    /// Default question for the stage.
    pub question: &'static str,
}

/// Follow-up wording produced by the oracle for the next turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextPrompt {
    pub questions: Vec<String>,
    #[serde(alias = "nextStep", skip_serializing_if = "Option::is_none")]
    pub next_stage: Option<Stage>,
    pub is_complete: bool,
}

impl From<StageDecision> for NextPrompt {
    fn from(decision: StageDecision) -> Self {
        Self {
            questions: vec![decision.question.to_string()],
            next_stage: Some(decision.stage),
            is_complete: decision.is_complete,
        }
    }
}

/// Decides where the conversation goes next.
pub struct StepAdvancer;

impl StepAdvancer {
    pub fn evaluate(profile: &Profile) -> StageDecision {
        if profile.first_name().is_none() {
            StageDecision {
                stage: Stage::PersonalInfo,
                is_complete: false,
                question: ASK_FULL_NAME,
            }
        } else if profile.work_experience.is_empty() {
            StageDecision {
                stage: Stage::WorkExperience,
                is_complete: false,
                question: ASK_WORK_HISTORY,
            }
        } else if profile.skills.is_empty() {
            StageDecision {
                stage: Stage::Skills,
                is_complete: false,
                question: ASK_SKILLS,
            }
        } else {
            StageDecision {
                stage: Stage::Review,
                is_complete: true,
                question: ASK_CONFIRMATION,
            }
        }
    }

    /// Builds the assistant reply for a decision and the oracle's wording.
    pub fn compose_reply(decision: &StageDecision, prompt: &NextPrompt) -> String {
        if decision.is_complete {
            return COMPLETION_MESSAGE.to_string();
        }

        let questions: Vec<&str> = prompt
            .questions
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .take(MAX_QUESTIONS)
            .collect();

        if questions.is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            questions.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{PersonalInfo, Skill, SkillCategory, WorkExperience};

    fn with_name() -> Profile {
        Profile {
            personal_info: Some(PersonalInfo {
                first_name: Some("John".to_string()),
                ..PersonalInfo::default()
            }),
            ..Profile::default()
        }
    }

    #[test]
    fn empty_profile_asks_for_name() {
        let decision = StepAdvancer::evaluate(&Profile::default());
        assert_eq!(decision.stage, Stage::PersonalInfo);
        assert!(!decision.is_complete);
        assert_eq!(decision.question, ASK_FULL_NAME);
    }

    #[test]
    fn named_profile_asks_for_work_history() {
        let decision = StepAdvancer::evaluate(&with_name());
        assert_eq!(decision.stage, Stage::WorkExperience);
        assert!(!decision.is_complete);
    }

    #[test]
    fn skills_requested_after_work_history() {
        let mut profile = with_name();
        profile.work_experience.push(WorkExperience::new("Welder"));

        assert_eq!(StepAdvancer::evaluate(&profile).stage, Stage::Skills);
    }

    #[test]
    fn full_profile_is_complete_review() {
        let mut profile = with_name();
        profile.work_experience.push(WorkExperience::new("Welder"));
        profile.skills.push(Skill::new("Welding", SkillCategory::Technical));

        let decision = StepAdvancer::evaluate(&profile);
        assert_eq!(decision.stage, Stage::Review);
        assert!(decision.is_complete);
    }

    #[test]
    fn name_gate_wins_over_later_sections() {
        let profile = Profile {
            work_experience: vec![WorkExperience::new("Welder")],
            skills: vec![Skill::new("Welding", SkillCategory::Technical)],
            ..Profile::default()
        };
        assert_eq!(StepAdvancer::evaluate(&profile).stage, Stage::PersonalInfo);
    }

    #[test]
    fn evaluation_is_stable_across_calls() {
        let mut profile = with_name();
        profile.skills.push(Skill::new("Driving", SkillCategory::Equipment));

        let first = StepAdvancer::evaluate(&profile);
        let _ = StepAdvancer::evaluate(&Profile::default());
        let second = StepAdvancer::evaluate(&profile);
        assert_eq!(first, second);
        assert_eq!(first.stage, Stage::WorkExperience);
    }

    #[test]
    fn completed_reply_ignores_questions() {
        let decision = StageDecision {
            stage: Stage::Review,
            is_complete: true,
            question: ASK_CONFIRMATION,
        };
        let prompt = NextPrompt {
            questions: vec!["Anything else?".to_string()],
            ..NextPrompt::default()
        };
        assert_eq!(StepAdvancer::compose_reply(&decision, &prompt), COMPLETION_MESSAGE);
    }

    #[test]
    fn questions_are_joined_with_single_space() {
        let decision = StepAdvancer::evaluate(&with_name());
        let prompt = NextPrompt {
            questions: vec![
                "Where did you work?".to_string(),
                " ".to_string(),
                "For how long?".to_string(),
            ],
            ..NextPrompt::default()
        };
        assert_eq!(
            StepAdvancer::compose_reply(&decision, &prompt),
            "Where did you work? For how long?"
        );
    }

    #[test]
    fn no_questions_falls_back() {
        let decision = StepAdvancer::evaluate(&with_name());
        assert_eq!(
            StepAdvancer::compose_reply(&decision, &NextPrompt::default()),
            FALLBACK_REPLY
        );
    }

    #[test]
    fn next_prompt_reads_next_step_alias() {
        let prompt: NextPrompt = serde_json::from_str(
            r#"{"questions":["What is your full name?"],"nextStep":"personal_info","isComplete":false}"#,
        )
        .unwrap();
        assert_eq!(prompt.next_stage, Some(Stage::PersonalInfo));
        assert_eq!(prompt.questions.len(), 1);
    }
}

//! Extraction oracle backed by a language model.
//!
//! Each operation is a single completion. Model output is treated as
//! untrusted: the outermost JSON object is cut out of the reply, blank and
//! placeholder values are stripped, and only then is it deserialized into
//! domain types.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::profile::{non_blank, Profile, ProfileFragment};
use crate::domain::session::{NextPrompt, Stage, MAX_QUESTIONS};
use crate::ports::{
    AIProvider, CompletionRequest, ExtractionOracle, MessageRole, OracleError, RequestMetadata,
};

/// Question used when the model gives no usable follow-up.
pub const FALLBACK_QUESTION: &str = "Could you tell me more about your work experience?";

const EXTRACTION_PROMPT: &str = r#"You extract CV information from a job seeker's message.

Return a single JSON object with any of these keys:
{
  "personalInfo": {"firstName": "", "lastName": "", "email": "", "phone": "", "address": "", "city": "", "country": "", "dateOfBirth": "", "nationality": ""},
  "workInfo": {"yearsOfExperience": 0, "targetPosition": "", "industry": "", "workPermitStatus": "citizen|permanent_resident|work_permit|visa_required", "drivingLicense": true, "willingToRelocate": true},
  "skills": [{"name": "", "category": "technical|soft|language|certification|equipment|safety", "level": "beginner|intermediate|advanced|expert", "yearsOfExperience": 0}],
  "workExperience": [{"jobTitle": "", "companyName": "", "location": "", "startDate": "", "endDate": "", "isCurrentJob": false, "description": "", "responsibilities": [], "achievements": [], "industry": ""}],
  "education": [{"institutionName": "", "degree": "", "fieldOfStudy": "", "location": "", "startDate": "", "endDate": "", "isCompleted": true, "grade": "", "educationType": ""}],
  "languages": [{"language": "", "level": ""}],
  "certifications": [{"name": "", "issuer": "", "dateObtained": "", "expiryDate": ""}]
}

Only include fields that have actual information in the message. Omit everything else.
Return only the JSON object, with no commentary."#;

const FOLLOW_UP_PROMPT: &str = r#"You are a friendly assistant helping a job seeker build a CV through conversation.

Given the information collected so far and the current step, ask 1 to 3 short questions that gather what is still missing.
Steps, in order: personal_info, work_experience, skills, education, review.

Respond with JSON only:
{"questions": ["..."], "nextStep": "personal_info|work_experience|skills|education|review", "isComplete": false}"#;

const SUMMARY_PROMPT: &str = "Write a professional summary for a CV in 2 to 3 sentences, \
based on the candidate information provided. Return only the summary text.";

/// Oracle that delegates to an [`AIProvider`].
pub struct LlmExtractionOracle {
    provider: Arc<dyn AIProvider>,
}

impl LlmExtractionOracle {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    async fn ask(
        &self,
        operation: &'static str,
        system: &str,
        user: String,
        temperature: f32,
    ) -> Result<String, OracleError> {
        let request = CompletionRequest::new(RequestMetadata::new(operation))
            .with_system_prompt(system)
            .with_message(MessageRole::User, user)
            .with_max_tokens(2048)
            .with_temperature(temperature);

        let response = self.provider.complete(request).await?;
        tracing::debug!(
            operation,
            model = %response.model,
            tokens = response.usage.total_tokens,
            "oracle completion"
        );
        Ok(response.content)
    }
}

#[async_trait]
impl ExtractionOracle for LlmExtractionOracle {
    async fn extract(&self, utterance: &str) -> Result<ProfileFragment, OracleError> {
        let reply = self
            .ask("extract", EXTRACTION_PROMPT, utterance.to_string(), 0.0)
            .await?;

        let Some(json) = outermost_object(&reply) else {
            tracing::debug!("no JSON object in extraction reply");
            return Ok(ProfileFragment::default());
        };

        let value: Value = serde_json::from_str(json)
            .map_err(|e| OracleError::malformed(format!("extraction reply: {}", e)))?;
        let value = sanitize(value).unwrap_or_else(|| Value::Object(Map::new()));

        let fragment: ProfileFragment = serde_json::from_value(value)
            .map_err(|e| OracleError::malformed(format!("extraction shape: {}", e)))?;

        Ok(prune(fragment))
    }

    async fn next_prompt(&self, profile: &Profile, stage: Stage) -> Result<NextPrompt, OracleError> {
        let collected = serde_json::to_string_pretty(profile)
            .map_err(|e| OracleError::malformed(e.to_string()))?;
        let user = format!(
            "Current step: {}\n\nInformation collected so far:\n{}",
            stage, collected
        );

        let reply = self.ask("next_prompt", FOLLOW_UP_PROMPT, user, 0.7).await?;

        let Some(json) = outermost_object(&reply) else {
            return Ok(NextPrompt {
                questions: vec![FALLBACK_QUESTION.to_string()],
                next_stage: Some(Stage::WorkExperience),
                is_complete: false,
            });
        };

        let raw: RawPrompt = serde_json::from_str(json)
            .map_err(|e| OracleError::malformed(format!("follow-up reply: {}", e)))?;

        Ok(NextPrompt {
            questions: raw
                .questions
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .take(MAX_QUESTIONS)
                .collect(),
            next_stage: raw.next_step.and_then(|s| s.parse().ok()),
            is_complete: raw.is_complete,
        })
    }

    async fn summarize(&self, profile: &Profile) -> Result<String, OracleError> {
        let candidate = serde_json::to_string_pretty(profile)
            .map_err(|e| OracleError::malformed(e.to_string()))?;

        let reply = self
            .ask("summarize", SUMMARY_PROMPT, format!("Candidate information:\n{}", candidate), 0.7)
            .await?;

        let summary = reply.trim();
        if summary.is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        Ok(summary.to_string())
    }
}

/// Follow-up reply as the model writes it. Stage names are checked later.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPrompt {
    questions: Vec<String>,
    #[serde(alias = "nextStage")]
    next_step: Option<String>,
    is_complete: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Reply cleanup
// ════════════════════════════════════════════════════════════════════════════════

/// Slice from the first `{` to the last `}`.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Drops nulls, blank strings, zero counts and containers left empty.
///
/// Returns `None` when nothing meaningful remains.
fn sanitize(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(Value::String(s.trim().to_string())),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) => {
            let items: Vec<Value> = items.into_iter().filter_map(sanitize).collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        Value::Object(fields) => {
            let mut cleaned = Map::new();
            for (key, field) in fields {
                let field = if key == "yearsOfExperience" {
                    whole_years(field)
                } else {
                    sanitize(field)
                };
                if let Some(field) = field {
                    cleaned.insert(key, field);
                }
            }
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        other => Some(other),
    }
}

/// Accepts `5`, `5.5` and `"5 years"` style values; anything else is dropped.
fn whole_years(value: Value) -> Option<Value> {
    let years = match &value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if years.is_finite() && years >= 1.0 {
        Some(Value::from(years.round() as u64))
    } else {
        None
    }
}

/// Removes entries without their identifying field.
fn prune(mut fragment: ProfileFragment) -> ProfileFragment {
    fragment.skills.retain(|s| !s.name.trim().is_empty());
    fragment.languages.retain(|l| !l.name.trim().is_empty());
    fragment.certifications.retain(|c| !c.name.trim().is_empty());
    fragment.work_experience.retain(|w| {
        non_blank(&w.title).is_some()
            || non_blank(&w.company).is_some()
            || non_blank(&w.description).is_some()
    });
    fragment.education.retain(|e| {
        non_blank(&e.institution).is_some()
            || non_blank(&e.degree).is_some()
            || non_blank(&e.field_of_study).is_some()
    });
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::profile::SkillCategory;
    use serde_json::json;

    fn oracle(mock: &MockAIProvider) -> LlmExtractionOracle {
        LlmExtractionOracle::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn extract_reads_json_wrapped_in_prose() {
        let mock = MockAIProvider::new().with_response(
            "Here you go:\n```json\n{\"personalInfo\":{\"firstName\":\"Ana\",\"lastName\":\"\"},\
             \"skills\":[{\"name\":\"Welding\",\"category\":\"technical\"},{\"name\":\"\"}]}\n```",
        );

        let fragment = oracle(&mock).extract("I'm Ana, a welder").await.unwrap();

        let info = fragment.personal_info.unwrap();
        assert_eq!(info.first_name.as_deref(), Some("Ana"));
        assert_eq!(info.last_name, None);
        assert_eq!(fragment.skills.len(), 1);
        assert_eq!(fragment.skills[0].category, Some(SkillCategory::Technical));

        let calls = mock.get_calls();
        assert_eq!(calls[0].metadata.operation, "extract");
        assert_eq!(calls[0].last_user_message(), Some("I'm Ana, a welder"));
    }

    #[tokio::test]
    async fn extract_without_json_is_empty() {
        let mock = MockAIProvider::new().with_response("Sorry, I found nothing.");
        let fragment = oracle(&mock).extract("hi").await.unwrap();
        assert!(fragment.is_empty());
    }

    #[tokio::test]
    async fn extract_drops_placeholder_sections() {
        let mock = MockAIProvider::new().with_response(
            r#"{"personalInfo":{"firstName":"","email":null},"workInfo":{"yearsOfExperience":"7 years"},"education":[{"institutionName":"","isCompleted":true}]}"#,
        );

        let fragment = oracle(&mock).extract("seven years").await.unwrap();

        assert!(fragment.personal_info.is_none());
        assert_eq!(fragment.work_info.unwrap().years_of_experience, Some(7));
        assert!(fragment.education.is_empty());
    }

    #[tokio::test]
    async fn extract_rejects_broken_json() {
        let mock = MockAIProvider::new().with_response("{\"skills\": [");
        let result = oracle(&mock).extract("x").await;
        // No closing brace means there is no object to parse.
        assert!(result.unwrap().is_empty());

        let mock = MockAIProvider::new().with_response("{\"skills\": [}");
        let result = oracle(&mock).extract("x").await;
        assert!(matches!(result, Err(OracleError::MalformedOutput(_))));
    }

    #[tokio::test]
    async fn provider_failure_surfaces() {
        let mock = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let result = oracle(&mock).extract("x").await;
        assert!(matches!(result, Err(OracleError::Provider(_))));
    }

    #[tokio::test]
    async fn next_prompt_parses_and_caps_questions() {
        let mock = MockAIProvider::new().with_response(
            r#"{"questions":["Where did you work?","For how long?","Which tools?","Anything else?"],"nextStep":"work_experience","isComplete":false}"#,
        );

        let prompt = oracle(&mock)
            .next_prompt(&Profile::default(), Stage::PersonalInfo)
            .await
            .unwrap();

        assert_eq!(prompt.questions.len(), MAX_QUESTIONS);
        assert_eq!(prompt.next_stage, Some(Stage::WorkExperience));
        assert!(mock.get_calls()[0]
            .last_user_message()
            .unwrap()
            .starts_with("Current step: personal_info"));
    }

    #[tokio::test]
    async fn next_prompt_ignores_unknown_stage() {
        let mock = MockAIProvider::new()
            .with_response(r#"{"questions":["And your skills?"],"nextStep":"hobbies"}"#);

        let prompt = oracle(&mock)
            .next_prompt(&Profile::default(), Stage::Skills)
            .await
            .unwrap();

        assert_eq!(prompt.questions, vec!["And your skills?".to_string()]);
        assert_eq!(prompt.next_stage, None);
    }

    #[tokio::test]
    async fn next_prompt_without_json_falls_back() {
        let mock = MockAIProvider::new().with_response("Tell me about your jobs!");

        let prompt = oracle(&mock)
            .next_prompt(&Profile::default(), Stage::WorkExperience)
            .await
            .unwrap();

        assert_eq!(prompt.questions, vec![FALLBACK_QUESTION.to_string()]);
        assert_eq!(prompt.next_stage, Some(Stage::WorkExperience));
    }

    #[tokio::test]
    async fn summarize_trims_reply() {
        let mock = MockAIProvider::new().with_response("  Reliable welder.\n");
        let summary = oracle(&mock).summarize(&Profile::default()).await.unwrap();
        assert_eq!(summary, "Reliable welder.");
    }

    #[tokio::test]
    async fn summarize_empty_reply_is_error() {
        let mock = MockAIProvider::new().with_response("   ");
        let result = oracle(&mock).summarize(&Profile::default()).await;
        assert!(matches!(result, Err(OracleError::EmptyResponse)));
    }

    #[test]
    fn sanitize_strips_recursively() {
        let cleaned = sanitize(json!({
            "a": "",
            "b": 0,
            "c": [" x ", ""],
            "d": {"e": null},
            "f": true
        }))
        .unwrap();

        assert_eq!(cleaned, json!({"c": ["x"], "f": true}));
        assert_eq!(sanitize(json!({"a": ""})), None);
    }

    #[test]
    fn whole_years_accepts_common_forms() {
        assert_eq!(whole_years(json!(5)), Some(json!(5)));
        assert_eq!(whole_years(json!(4.6)), Some(json!(5)));
        assert_eq!(whole_years(json!("12 years")), Some(json!(12)));
        assert_eq!(whole_years(json!("several")), None);
        assert_eq!(whole_years(json!(0)), None);
    }
}

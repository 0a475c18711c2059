//! Deterministic, pattern-based extraction oracle.
//!
//! Used offline, in development and in tests. It recognizes a small set of
//! phrasings (self-introductions, "N years", a table of common trades,
//! contact details, spoken languages, licence and relocation answers) and
//! words follow-up questions with the stage machine's defaults.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::profile::{
    Language, PersonalInfo, Profile, ProfileFragment, Skill, SkillCategory, SkillLevel,
    WorkExperience, WorkInfo,
};
use crate::domain::session::{NextPrompt, Stage, StepAdvancer};
use crate::ports::{ExtractionOracle, OracleError};

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:my name is|call me)\s+(\p{Lu}[\p{L}'-]*)(?:\s+(\p{Lu}[\p{L}'-]*))?")
        .expect("valid name regex")
});

/// "I am X" / "I'm X" is also how people state nationality or mood, so its
/// captures go through [`NATIONALITIES`] and [`NOT_NAMES`] first.
static SELF_INTRO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:I am|I'm)\s+(\p{Lu}[\p{L}'-]*)(?:\s+(\p{Lu}[\p{L}'-]*))?")
        .expect("valid self-introduction regex")
});

const NATIONALITIES: &[&str] = &[
    "afghan", "albanian", "american", "belarusian", "brazilian", "british", "bulgarian",
    "canadian", "chinese", "croatian", "czech", "danish", "dutch", "english", "eritrean",
    "estonian", "filipino", "finnish", "french", "georgian", "german", "greek", "hungarian",
    "indian", "iranian", "iraqi", "irish", "italian", "japanese", "latvian", "lithuanian",
    "mexican", "moldovan", "moroccan", "nepalese", "nigerian", "norwegian", "pakistani",
    "polish", "portuguese", "romanian", "russian", "scottish", "serbian", "slovak",
    "slovenian", "somali", "spanish", "sudanese", "swedish", "syrian", "turkish",
    "ukrainian", "vietnamese", "welsh",
];

const NOT_NAMES: &[&str] = &[
    "a", "able", "also", "an", "available", "based", "currently", "experienced", "fine",
    "fluent", "from", "good", "happy", "here", "hoping", "interested", "just", "living",
    "looking", "married", "new", "not", "now", "okay", "ok", "ready", "really", "self",
    "single", "sorry", "still", "sure", "the", "very", "willing", "working",
];

static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").expect("valid years regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{6,}\d").expect("valid phone regex"));

static YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}\s*[-\x{2013}]\s*\d{4}\b").expect("valid year range regex")
});

/// Numbers without an international prefix need this many digits.
const MIN_PHONE_DIGITS: usize = 9;

static SPEAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bI speak\s+([\p{L} ,]+?)(?:[.!?;]|$)").expect("valid languages regex")
});

static NO_LICENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:no|don't have an?|do not have an?|without an?)\s+(?:driving|driver'?s)\s+licen[cs]e")
        .expect("valid licence regex")
});

static LICENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:driving|driver'?s)\s+licen[cs]e").expect("valid licence regex")
});

static NO_RELOCATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:not|won't|cannot|can't|don't want to)\s+(?:willing to\s+|able to\s+)?relocat")
        .expect("valid relocation regex")
});

static RELOCATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\brelocat").expect("valid relocation regex"));

/// A recognizable line of work.
struct Trade {
    keywords: &'static [&'static str],
    skill: &'static str,
    category: SkillCategory,
    position: &'static str,
    industry: &'static str,
}

static TRADES: Lazy<Vec<Trade>> = Lazy::new(|| {
    vec![
        Trade {
            keywords: &["construction"],
            skill: "Construction",
            category: SkillCategory::Technical,
            position: "Construction Worker",
            industry: "Construction",
        },
        Trade {
            keywords: &["welding", "welder"],
            skill: "Welding",
            category: SkillCategory::Technical,
            position: "Welder",
            industry: "Manufacturing",
        },
        Trade {
            keywords: &["electrician", "electrical"],
            skill: "Electrical Installation",
            category: SkillCategory::Technical,
            position: "Electrician",
            industry: "Construction",
        },
        Trade {
            keywords: &["plumbing", "plumber"],
            skill: "Plumbing",
            category: SkillCategory::Technical,
            position: "Plumber",
            industry: "Construction",
        },
        Trade {
            keywords: &["carpentry", "carpenter", "joiner"],
            skill: "Carpentry",
            category: SkillCategory::Technical,
            position: "Carpenter",
            industry: "Construction",
        },
        Trade {
            keywords: &["painting", "painter", "decorator"],
            skill: "Painting",
            category: SkillCategory::Technical,
            position: "Painter",
            industry: "Construction",
        },
        Trade {
            keywords: &["truck", "lorry", "hgv"],
            skill: "Truck Driving",
            category: SkillCategory::Equipment,
            position: "Truck Driver",
            industry: "Transport and Logistics",
        },
        Trade {
            keywords: &["forklift", "warehouse"],
            skill: "Forklift Operation",
            category: SkillCategory::Equipment,
            position: "Warehouse Operative",
            industry: "Logistics",
        },
        Trade {
            keywords: &["cleaning", "cleaner", "janitor"],
            skill: "Cleaning",
            category: SkillCategory::Technical,
            position: "Cleaner",
            industry: "Facility Services",
        },
        Trade {
            keywords: &["cooking", "cook", "chef", "kitchen"],
            skill: "Cooking",
            category: SkillCategory::Technical,
            position: "Cook",
            industry: "Hospitality",
        },
    ]
});

/// Pattern-matching oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedOracle;

impl RuleBasedOracle {
    pub fn new() -> Self {
        Self
    }

    fn personal_info(utterance: &str) -> Option<PersonalInfo> {
        let mut info = PersonalInfo::default();

        if let Some(caps) = NAME_RE.captures(utterance) {
            info.first_name = caps.get(1).map(|m| m.as_str().to_string());
            info.last_name = caps.get(2).map(|m| m.as_str().to_string());
        }
        Self::self_introduction(utterance, &mut info);
        info.email = EMAIL_RE.find(utterance).map(|m| m.as_str().to_string());
        info.phone = Self::phone(utterance);

        (!info.is_empty()).then_some(info)
    }

    /// Reads "I'm Polish" as a nationality and "I'm Ana Nowak" as a name.
    fn self_introduction(utterance: &str, info: &mut PersonalInfo) {
        for caps in SELF_INTRO_RE.captures_iter(utterance) {
            let Some(first) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let lowered = first.to_lowercase();

            if NATIONALITIES.contains(&lowered.as_str()) {
                info.nationality.get_or_insert_with(|| first.to_string());
                continue;
            }
            if NOT_NAMES.contains(&lowered.as_str()) || info.first_name.is_some() {
                continue;
            }

            info.first_name = Some(first.to_string());
            info.last_name = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|last| {
                    let last = last.to_lowercase();
                    !NATIONALITIES.contains(&last.as_str()) && !NOT_NAMES.contains(&last.as_str())
                })
                .map(str::to_string);
        }
    }

    fn phone(utterance: &str) -> Option<String> {
        let without_years = YEAR_RANGE_RE.replace_all(utterance, " ");
        PHONE_RE
            .find_iter(&without_years)
            .map(|m| m.as_str().trim())
            .find(|candidate| {
                candidate.starts_with('+')
                    || candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
            })
            .map(str::to_string)
    }

    fn years(utterance: &str) -> Option<u32> {
        YEARS_RE
            .captures(utterance)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn trades(utterance: &str) -> Vec<&'static Trade> {
        let lowered = utterance.to_lowercase();
        TRADES
            .iter()
            .filter(|trade| {
                lowered
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|word| trade.keywords.contains(&word))
            })
            .collect()
    }

    fn languages(utterance: &str) -> Vec<Language> {
        let Some(caps) = SPEAK_RE.captures(utterance) else {
            return Vec::new();
        };
        let list = caps.get(1).map_or("", |m| m.as_str());

        list.split(',')
            .flat_map(|part| part.split(" and "))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Language::new(capitalize(name), None))
            .collect()
    }

    fn driving_license(utterance: &str) -> Option<bool> {
        if NO_LICENCE_RE.is_match(utterance) {
            Some(false)
        } else if LICENCE_RE.is_match(utterance) {
            Some(true)
        } else {
            None
        }
    }

    fn willing_to_relocate(utterance: &str) -> Option<bool> {
        if NO_RELOCATE_RE.is_match(utterance) {
            Some(false)
        } else if RELOCATE_RE.is_match(utterance) {
            Some(true)
        } else {
            None
        }
    }

    fn summary_of(profile: &Profile) -> Option<String> {
        let work = profile.work_info.clone().unwrap_or_default();
        let head = work
            .target_position
            .filter(|p| !p.trim().is_empty())
            .or_else(|| profile.work_experience.iter().find_map(|e| e.title.clone()));

        let skills: Vec<&str> = profile
            .skills
            .iter()
            .map(|s| s.name.trim())
            .filter(|s| !s.is_empty())
            .take(3)
            .collect();

        if head.is_none() && skills.is_empty() {
            return None;
        }

        let head = head.unwrap_or_else(|| "Dedicated professional".to_string());
        let mut summary = match work.years_of_experience {
            Some(years) if years > 0 => format!("{} with {} years of experience.", head, years),
            _ => format!("{}.", head),
        };
        if !skills.is_empty() {
            summary.push_str(&format!(" Skilled in {}.", join_words(&skills)));
        }

        let languages: Vec<&str> = profile.languages.iter().map(|l| l.name.as_str()).collect();
        if !languages.is_empty() {
            summary.push_str(&format!(" Speaks {}.", join_words(&languages)));
        }
        Some(summary)
    }
}

#[async_trait]
impl ExtractionOracle for RuleBasedOracle {
    async fn extract(&self, utterance: &str) -> Result<ProfileFragment, OracleError> {
        let years = Self::years(utterance);
        let trades = Self::trades(utterance);

        let mut work = WorkInfo {
            years_of_experience: years,
            driving_license: Self::driving_license(utterance),
            willing_to_relocate: Self::willing_to_relocate(utterance),
            ..WorkInfo::default()
        };
        if let Some(first) = trades.first() {
            work.target_position = Some(first.position.to_string());
            work.industry = Some(first.industry.to_string());
        }

        let skills = trades
            .iter()
            .map(|trade| Skill {
                name: trade.skill.to_string(),
                category: Some(trade.category.clone()),
                level: Some(SkillLevel::Intermediate),
                years_of_experience: years,
            })
            .collect();

        let work_experience = trades
            .iter()
            .map(|trade| WorkExperience {
                industry: Some(trade.industry.to_string()),
                ..WorkExperience::new(trade.position)
            })
            .collect();

        let fragment = ProfileFragment {
            personal_info: Self::personal_info(utterance),
            work_info: (!work.is_empty()).then_some(work),
            skills,
            work_experience,
            languages: Self::languages(utterance),
            ..ProfileFragment::default()
        };

        tracing::debug!(
            found_name = fragment.personal_info.is_some(),
            skills = fragment.skills.len(),
            "rule-based extraction"
        );
        Ok(fragment)
    }

    async fn next_prompt(&self, profile: &Profile, _stage: Stage) -> Result<NextPrompt, OracleError> {
        Ok(StepAdvancer::evaluate(profile).into())
    }

    async fn summarize(&self, profile: &Profile) -> Result<String, OracleError> {
        Self::summary_of(profile).ok_or(OracleError::EmptyResponse)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "A", "A and B", "A, B and C".
fn join_words(words: &[&str]) -> String {
    match words {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::merge;
    use crate::domain::session::ASK_WORK_HISTORY;

    #[tokio::test]
    async fn introduction_with_trade_and_years() {
        let oracle = RuleBasedOracle::new();
        let fragment = oracle
            .extract("My name is John Smith, I do construction, 5 years")
            .await
            .unwrap();

        let profile = merge(&Profile::default(), fragment);

        let info = profile.personal_info.as_ref().unwrap();
        assert_eq!(info.first_name.as_deref(), Some("John"));
        assert_eq!(info.last_name.as_deref(), Some("Smith"));

        let work = profile.work_info.as_ref().unwrap();
        assert_eq!(work.years_of_experience, Some(5));
        assert_eq!(work.target_position.as_deref(), Some("Construction Worker"));

        assert_eq!(profile.skills.len(), 1);
        assert_eq!(profile.skills[0].name, "Construction");
        assert_eq!(profile.skills[0].category, Some(SkillCategory::Technical));
        assert_eq!(profile.work_experience.len(), 1);

        let decision = StepAdvancer::evaluate(&profile);
        assert_ne!(decision.stage, Stage::PersonalInfo);
        assert_ne!(decision.stage, Stage::WorkExperience);
    }

    #[tokio::test]
    async fn nothing_recognized_is_empty_fragment() {
        let fragment = RuleBasedOracle::new().extract("hello there").await.unwrap();
        assert!(fragment.is_empty());
    }

    #[tokio::test]
    async fn contact_details_and_languages() {
        let fragment = RuleBasedOracle::new()
            .extract("You can reach me at ana.k@example.com or +48 600 123 456. I speak polish, English and German.")
            .await
            .unwrap();

        let info = fragment.personal_info.unwrap();
        assert_eq!(info.email.as_deref(), Some("ana.k@example.com"));
        assert_eq!(info.phone.as_deref(), Some("+48 600 123 456"));

        let names: Vec<&str> = fragment.languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Polish", "English", "German"]);
    }

    #[tokio::test]
    async fn licence_and_relocation_answers() {
        let oracle = RuleBasedOracle::new();

        let yes = oracle
            .extract("I have a driving licence and I'm happy to relocate")
            .await
            .unwrap()
            .work_info
            .unwrap();
        assert_eq!(yes.driving_license, Some(true));
        assert_eq!(yes.willing_to_relocate, Some(true));

        let no = oracle
            .extract("I don't have a driving license and I can't relocate")
            .await
            .unwrap()
            .work_info
            .unwrap();
        assert_eq!(no.driving_license, Some(false));
        assert_eq!(no.willing_to_relocate, Some(false));
    }

    #[tokio::test]
    async fn lowercase_i_am_phrase_is_not_a_name() {
        let fragment = RuleBasedOracle::new().extract("I am a welder").await.unwrap();
        assert!(fragment.personal_info.is_none());
        assert_eq!(fragment.skills[0].name, "Welding");
    }

    #[tokio::test]
    async fn nationality_is_not_taken_for_a_name() {
        let fragment = RuleBasedOracle::new()
            .extract("I'm Polish and I work as a cleaner")
            .await
            .unwrap();

        let info = fragment.personal_info.clone().unwrap();
        assert_eq!(info.first_name, None);
        assert_eq!(info.nationality.as_deref(), Some("Polish"));
        assert_eq!(fragment.skills[0].name, "Cleaning");

        let profile = merge(&Profile::default(), fragment);
        assert_eq!(StepAdvancer::evaluate(&profile).stage, Stage::PersonalInfo);
    }

    #[tokio::test]
    async fn name_and_nationality_in_one_sentence() {
        let info = RuleBasedOracle::new()
            .extract("I'm Olena Kovalenko and I am Ukrainian. I'm happy to relocate")
            .await
            .unwrap()
            .personal_info
            .unwrap();

        assert_eq!(info.first_name.as_deref(), Some("Olena"));
        assert_eq!(info.last_name.as_deref(), Some("Kovalenko"));
        assert_eq!(info.nationality.as_deref(), Some("Ukrainian"));
    }

    #[tokio::test]
    async fn adjective_after_i_am_is_not_a_name() {
        let fragment = RuleBasedOracle::new()
            .extract("I'm Available from Monday")
            .await
            .unwrap();
        assert!(fragment.personal_info.is_none());
    }

    #[tokio::test]
    async fn year_range_is_not_a_phone_number() {
        let info = RuleBasedOracle::new()
            .extract("My name is Ana Nowak. I worked as a welder from 2015 - 2020")
            .await
            .unwrap()
            .personal_info
            .unwrap();

        assert_eq!(info.first_name.as_deref(), Some("Ana"));
        assert_eq!(info.last_name.as_deref(), Some("Nowak"));
        assert_eq!(info.phone, None);
    }

    #[test]
    fn phone_needs_prefix_or_enough_digits() {
        assert_eq!(
            RuleBasedOracle::phone("worked 2015\u{2013}2020, call 600 123 456").as_deref(),
            Some("600 123 456")
        );
        assert_eq!(
            RuleBasedOracle::phone("+44 20 7946 0958").as_deref(),
            Some("+44 20 7946 0958")
        );
        assert_eq!(RuleBasedOracle::phone("badge 1234 5678"), None);
    }

    #[tokio::test]
    async fn next_prompt_uses_stage_defaults() {
        let profile = Profile {
            personal_info: Some(PersonalInfo {
                first_name: Some("Ana".to_string()),
                ..PersonalInfo::default()
            }),
            ..Profile::default()
        };

        let prompt = RuleBasedOracle::new()
            .next_prompt(&profile, Stage::PersonalInfo)
            .await
            .unwrap();

        assert_eq!(prompt.questions, vec![ASK_WORK_HISTORY.to_string()]);
        assert_eq!(prompt.next_stage, Some(Stage::WorkExperience));
        assert!(!prompt.is_complete);
    }

    #[tokio::test]
    async fn summary_mentions_position_years_and_skills() {
        let oracle = RuleBasedOracle::new();
        let fragment = oracle
            .extract("My name is John Smith, I do construction and welding, 5 years")
            .await
            .unwrap();
        let profile = merge(&Profile::default(), fragment);

        let summary = oracle.summarize(&profile).await.unwrap();
        assert_eq!(
            summary,
            "Construction Worker with 5 years of experience. Skilled in Construction and Welding."
        );
    }

    #[tokio::test]
    async fn summary_of_empty_profile_fails() {
        let result = RuleBasedOracle::new().summarize(&Profile::default()).await;
        assert!(matches!(result, Err(OracleError::EmptyResponse)));
    }

    #[test]
    fn join_words_uses_oxford_free_list() {
        assert_eq!(join_words(&["A"]), "A");
        assert_eq!(join_words(&["A", "B"]), "A and B");
        assert_eq!(join_words(&["A", "B", "C"]), "A, B and C");
    }
}

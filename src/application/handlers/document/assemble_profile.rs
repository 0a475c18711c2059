//! ProfileAssembler - reconciles persisted records with the conversation.
//!
//! `assemble` is used for generation: it materializes a missing persisted
//! profile and asks for a summary when none exists. `snapshot` is the
//! read-only variant used for previews.

use std::sync::Arc;

use crate::domain::document::{
    assemble, DocumentError, DocumentModel, PersistedProfile, UserRecord,
};
use crate::domain::foundation::DomainError;
use crate::domain::profile::Profile;
use crate::ports::{ExtractionOracle, ProfileRepository, UserRepository};

pub struct ProfileAssembler {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    oracle: Arc<dyn ExtractionOracle>,
}

impl ProfileAssembler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        oracle: Arc<dyn ExtractionOracle>,
    ) -> Self {
        Self {
            users,
            profiles,
            oracle,
        }
    }

    /// Builds the document model for a render.
    pub async fn assemble(
        &self,
        user: &UserRecord,
        accumulated: &Profile,
    ) -> Result<DocumentModel, DocumentError> {
        let persisted = match self.profiles.find_by_user(&user.id).await? {
            Some(profile) => profile,
            None => self.materialize(user, accumulated).await,
        };

        let mut model = assemble(Some(&persisted), Some(user), accumulated);

        if !persisted.has_summary() && !accumulated.is_empty() {
            model.summary = self.summarize(&persisted, accumulated).await;
        }

        Ok(model)
    }

    /// Builds the document model without writing anything.
    pub async fn snapshot(
        &self,
        user: &UserRecord,
        accumulated: &Profile,
    ) -> Result<DocumentModel, DocumentError> {
        let persisted = self.profiles.find_by_user(&user.id).await?;
        Ok(assemble(persisted.as_ref(), Some(user), accumulated))
    }

    /// Creates the persisted profile from the conversation.
    ///
    /// Persistence failures are logged; the seeded profile is still used
    /// for this render and creation is attempted again next time.
    async fn materialize(&self, user: &UserRecord, accumulated: &Profile) -> PersistedProfile {
        let seeded = PersistedProfile::seeded_from(user.id, accumulated);

        if let Err(err) = self.store(user, accumulated, &seeded).await {
            tracing::warn!(
                session_id = %user.session_id,
                error = %err,
                "failed to materialize persisted profile"
            );
            return seeded;
        }

        match self.profiles.find_by_user(&user.id).await {
            Ok(Some(stored)) => stored,
            Ok(None) => seeded,
            Err(err) => {
                tracing::warn!(
                    session_id = %user.session_id,
                    error = %err,
                    "failed to reload materialized profile"
                );
                seeded
            }
        }
    }

    async fn store(
        &self,
        user: &UserRecord,
        accumulated: &Profile,
        seeded: &PersistedProfile,
    ) -> Result<(), DomainError> {
        if let Some(personal) = accumulated.personal_info.as_ref().filter(|p| !p.is_empty()) {
            self.users.update_personal_info(&user.id, personal).await?;
        }

        let row = PersistedProfile {
            skills: Vec::new(),
            work_experience: Vec::new(),
            education: Vec::new(),
            ..seeded.clone()
        };
        self.profiles.create(&row).await?;

        if !seeded.skills.is_empty() {
            self.profiles.bulk_insert_skills(&row.id, &seeded.skills).await?;
        }
        if !seeded.work_experience.is_empty() {
            self.profiles
                .bulk_insert_work_experience(&row.id, &seeded.work_experience)
                .await?;
        }
        if !seeded.education.is_empty() {
            self.profiles
                .bulk_insert_education(&row.id, &seeded.education)
                .await?;
        }

        tracing::info!(session_id = %user.session_id, profile_id = %row.id, "persisted profile created");
        Ok(())
    }

    /// One-shot summary; failures leave the summary empty.
    async fn summarize(&self, persisted: &PersistedProfile, accumulated: &Profile) -> Option<String> {
        let summary = match self.oracle.summarize(accumulated).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "summary generation failed, rendering without it");
                return None;
            }
        };

        if let Err(err) = self.profiles.update_summary(&persisted.id, &summary).await {
            tracing::warn!(profile_id = %persisted.id, error = %err, "failed to store summary");
        }
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProfileRepository, InMemoryUserRepository};
    use crate::adapters::oracle::RuleBasedOracle;
    use crate::domain::foundation::SessionId;
    use crate::domain::profile::{
        PersonalInfo, ProfileFragment, Skill, SkillCategory, WorkExperience, WorkInfo,
    };
    use crate::domain::session::{NextPrompt, Stage};
    use crate::ports::OracleError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Fixture {
        users: InMemoryUserRepository,
        profiles: InMemoryProfileRepository,
        user: UserRecord,
    }

    impl Fixture {
        async fn new() -> Self {
            let users = InMemoryUserRepository::new();
            let user = UserRecord::new(SessionId::new());
            users.create(&user).await.unwrap();
            Self {
                users,
                profiles: InMemoryProfileRepository::new(),
                user,
            }
        }

        fn assembler(&self, oracle: impl ExtractionOracle + 'static) -> ProfileAssembler {
            ProfileAssembler::new(
                Arc::new(self.users.clone()),
                Arc::new(self.profiles.clone()),
                Arc::new(oracle),
            )
        }
    }

    fn conversation() -> Profile {
        Profile {
            personal_info: Some(PersonalInfo {
                first_name: Some("John".to_string()),
                last_name: Some("Smith".to_string()),
                ..PersonalInfo::default()
            }),
            work_info: Some(WorkInfo {
                target_position: Some("Welder".to_string()),
                years_of_experience: Some(6),
                ..WorkInfo::default()
            }),
            skills: vec![Skill::new("Welding", SkillCategory::Technical)],
            work_experience: vec![WorkExperience::new("Welder")],
            ..Profile::default()
        }
    }

    /// Oracle whose summary always fails, counting attempts.
    #[derive(Default)]
    struct NoSummary {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl ExtractionOracle for NoSummary {
        async fn extract(&self, _u: &str) -> Result<ProfileFragment, OracleError> {
            Ok(Default::default())
        }

        async fn next_prompt(&self, _p: &Profile, _s: Stage) -> Result<NextPrompt, OracleError> {
            Ok(NextPrompt::default())
        }

        async fn summarize(&self, _p: &Profile) -> Result<String, OracleError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(OracleError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn materializes_missing_profile_once() {
        let fx = Fixture::new().await;
        let assembler = fx.assembler(RuleBasedOracle::new());
        let accumulated = conversation();

        let model = assembler.assemble(&fx.user, &accumulated).await.unwrap();

        assert_eq!(model.personal.full_name(), "John Smith");
        assert_eq!(model.skills.len(), 1);
        assert_eq!(
            model.summary.as_deref(),
            Some("Welder with 6 years of experience. Skilled in Welding.")
        );

        let stored = fx.profiles.find_by_user(&fx.user.id).await.unwrap().unwrap();
        assert_eq!(stored.skills.len(), 1);
        assert_eq!(stored.work_experience.len(), 1);
        assert!(stored.has_summary());

        let user = fx.users.find_by_session(&fx.user.session_id).await.unwrap().unwrap();
        assert_eq!(user.personal.full_name(), "John Smith");

        // Second render reuses the stored profile.
        assembler.assemble(&fx.user, &accumulated).await.unwrap();
        assert_eq!(fx.profiles.count().await, 1);
    }

    #[tokio::test]
    async fn persisted_sections_win() {
        let fx = Fixture::new().await;
        let mut persisted = PersistedProfile::new(fx.user.id);
        persisted.summary = Some("Curated summary.".to_string());
        persisted.skills = vec![Skill::new("Forklift", SkillCategory::Equipment)];
        fx.profiles.create(&persisted).await.unwrap();

        let model = fx
            .assembler(NoSummary::default())
            .assemble(&fx.user, &conversation())
            .await
            .unwrap();

        assert_eq!(model.summary.as_deref(), Some("Curated summary."));
        assert_eq!(model.skills[0].name, "Forklift");
        // Persisted work experience is empty, so the conversation fills it.
        assert_eq!(model.work_experience.len(), 1);
    }

    #[tokio::test]
    async fn summary_failure_is_swallowed() {
        let fx = Fixture::new().await;
        let oracle = Arc::new(NoSummary::default());
        let assembler = ProfileAssembler::new(
            Arc::new(fx.users.clone()),
            Arc::new(fx.profiles.clone()),
            oracle.clone(),
        );

        let model = assembler.assemble(&fx.user, &conversation()).await.unwrap();

        assert_eq!(model.summary, None);
        assert_eq!(oracle.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_conversation_skips_summary() {
        let fx = Fixture::new().await;
        let oracle = Arc::new(NoSummary::default());
        let assembler = ProfileAssembler::new(
            Arc::new(fx.users.clone()),
            Arc::new(fx.profiles.clone()),
            oracle.clone(),
        );

        assembler
            .assemble(&fx.user, &Profile::default())
            .await
            .unwrap();

        assert_eq!(oracle.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn snapshot_writes_nothing() {
        let fx = Fixture::new().await;
        let model = fx
            .assembler(RuleBasedOracle::new())
            .snapshot(&fx.user, &conversation())
            .await
            .unwrap();

        assert_eq!(model.work_info.target_position.as_deref(), Some("Welder"));
        assert_eq!(model.summary, None);
        assert_eq!(fx.profiles.count().await, 0);
    }
}

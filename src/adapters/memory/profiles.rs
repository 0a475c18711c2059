//! In-memory ProfileRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::PersistedProfile;
use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp, UserId};
use crate::domain::profile::{overlay_work, Education, Skill, WorkExperience, WorkInfo};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<ProfileId, PersistedProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Applies `change` to a stored profile and bumps its timestamp.
    async fn modify<F>(&self, id: &ProfileId, change: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut PersistedProfile) + Send,
    {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::ProfileNotFound, format!("Profile not found: {}", id))
        })?;
        change(profile);
        profile.updated_at = Timestamp::now();
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &PersistedProfile) -> Result<(), DomainError> {
        self.profiles.write().await.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<PersistedProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .values()
            .filter(|p| &p.user_id == user_id)
            .max_by_key(|p| *p.created_at.as_datetime())
            .cloned())
    }

    async fn update_work_info(&self, id: &ProfileId, info: &WorkInfo) -> Result<(), DomainError> {
        let info = info.clone();
        self.modify(id, move |p| {
            p.work_info = overlay_work(p.work_info.clone(), info);
        })
        .await
    }

    async fn update_summary(&self, id: &ProfileId, summary: &str) -> Result<(), DomainError> {
        let summary = summary.to_string();
        self.modify(id, move |p| p.summary = Some(summary)).await
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError> {
        self.profiles.write().await.remove(id);
        Ok(())
    }

    async fn bulk_insert_skills(&self, id: &ProfileId, skills: &[Skill]) -> Result<(), DomainError> {
        let skills = skills.to_vec();
        self.modify(id, move |p| p.skills.extend(skills)).await
    }

    async fn bulk_insert_work_experience(
        &self,
        id: &ProfileId,
        entries: &[WorkExperience],
    ) -> Result<(), DomainError> {
        let entries = entries.to_vec();
        self.modify(id, move |p| p.work_experience.extend(entries))
            .await
    }

    async fn bulk_insert_education(
        &self,
        id: &ProfileId,
        entries: &[Education],
    ) -> Result<(), DomainError> {
        let entries = entries.to_vec();
        self.modify(id, move |p| p.education.extend(entries)).await
    }

    async fn delete_skills(&self, id: &ProfileId) -> Result<(), DomainError> {
        self.modify(id, |p| p.skills.clear()).await
    }

    async fn delete_work_experience(&self, id: &ProfileId) -> Result<(), DomainError> {
        self.modify(id, |p| p.work_experience.clear()).await
    }

    async fn delete_education(&self, id: &ProfileId) -> Result<(), DomainError> {
        self.modify(id, |p| p.education.clear()).await
    }
}

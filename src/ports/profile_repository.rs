//! CV profile repository port.
//!
//! A user has at most one profile. Collections (skills, work experience,
//! education) are stored one row per entry; languages and certifications
//! live on the profile itself.

use async_trait::async_trait;

use crate::domain::document::PersistedProfile;
use crate::domain::foundation::{DomainError, ProfileId, UserId};
use crate::domain::profile::{Education, Skill, WorkExperience, WorkInfo};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Save a new profile together with its collection entries.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, profile: &PersistedProfile) -> Result<(), DomainError>;

    /// Find the profile of a user, with all collection entries loaded.
    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<PersistedProfile>, DomainError>;

    /// Overwrite the work-info scalars that are present and non-blank.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if the profile doesn't exist
    async fn update_work_info(&self, id: &ProfileId, info: &WorkInfo) -> Result<(), DomainError>;

    /// Replace the summary text.
    async fn update_summary(&self, id: &ProfileId, summary: &str) -> Result<(), DomainError>;

    /// Delete a profile and its collection entries.
    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Collections
    // ─────────────────────────────────────────────────────────────────────────

    async fn bulk_insert_skills(&self, id: &ProfileId, skills: &[Skill]) -> Result<(), DomainError>;

    async fn bulk_insert_work_experience(
        &self,
        id: &ProfileId,
        entries: &[WorkExperience],
    ) -> Result<(), DomainError>;

    async fn bulk_insert_education(
        &self,
        id: &ProfileId,
        entries: &[Education],
    ) -> Result<(), DomainError>;

    async fn add_skill(&self, id: &ProfileId, skill: &Skill) -> Result<(), DomainError> {
        self.bulk_insert_skills(id, std::slice::from_ref(skill)).await
    }

    async fn add_work_experience(
        &self,
        id: &ProfileId,
        entry: &WorkExperience,
    ) -> Result<(), DomainError> {
        self.bulk_insert_work_experience(id, std::slice::from_ref(entry))
            .await
    }

    async fn add_education(&self, id: &ProfileId, entry: &Education) -> Result<(), DomainError> {
        self.bulk_insert_education(id, std::slice::from_ref(entry))
            .await
    }

    /// Remove every skill of a profile.
    async fn delete_skills(&self, id: &ProfileId) -> Result<(), DomainError>;

    /// Remove every work-experience entry of a profile.
    async fn delete_work_experience(&self, id: &ProfileId) -> Result<(), DomainError>;

    /// Remove every education entry of a profile.
    async fn delete_education(&self, id: &ProfileId) -> Result<(), DomainError>;
}

//! User repository port.
//!
//! Users are created when a chat session starts and are looked up by that
//! session's id afterwards.

use async_trait::async_trait;

use crate::domain::document::UserRecord;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::profile::PersonalInfo;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &UserRecord) -> Result<(), DomainError>;

    /// Find the user owning a chat session.
    ///
    /// Returns `None` if not found.
    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Option<UserRecord>, DomainError>;

    /// Overwrite the personal fields that are present and non-blank in `info`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_personal_info(
        &self,
        user_id: &UserId,
        info: &PersonalInfo,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}

//! In-memory UserRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::UserRecord;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::profile::{overlay_personal, PersonalInfo};
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &UserRecord) -> Result<(), DomainError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<UserRecord>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| &u.session_id == session_id)
            .max_by_key(|u| *u.created_at.as_datetime())
            .cloned())
    }

    async fn update_personal_info(
        &self,
        user_id: &UserId,
        info: &PersonalInfo,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user_id))
        })?;

        user.personal = overlay_personal(user.personal.clone(), info.clone());
        user.updated_at = Timestamp::now();
        Ok(())
    }
}

//! PostgreSQL implementation of ChatSessionRepository.
//!
//! A session id may own several chat rows; reads and saves always target the
//! most recently created one.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::profile::Profile;
use crate::domain::session::{ChatMessage, ChatSession, Stage};
use crate::ports::ChatSessionRepository;

#[derive(Clone)]
pub struct PostgresChatSessionRepository {
    pool: PgPool,
}

impl PostgresChatSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatSessionRepository for PostgresChatSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_sessions (
                session_id, user_id, messages, current_stage, extracted_data,
                is_completed, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_uuid())
        .bind(Json(session.messages()))
        .bind(session.stage().as_str())
        .bind(Json(session.profile()))
        .bind(session.is_complete())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert chat session", e))?;

        Ok(())
    }

    async fn find_latest_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<ChatSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT session_id, user_id, messages, current_stage, extracted_data,
                   is_completed, created_at, updated_at
            FROM chat_sessions
            WHERE session_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch chat session", e))?;

        row.as_ref().map(row_to_chat_session).transpose()
    }

    async fn save(&self, session: &ChatSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE chat_sessions SET
                messages = $2,
                current_stage = $3,
                extracted_data = $4,
                is_completed = $5,
                updated_at = $6
            WHERE id = (
                SELECT id FROM chat_sessions
                WHERE session_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(Json(session.messages()))
        .bind(session.stage().as_str())
        .bind(Json(session.profile()))
        .bind(session.is_complete())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update chat session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Chat session not found: {}", session.id()),
            ));
        }
        Ok(())
    }
}

fn row_to_chat_session(row: &PgRow) -> Result<ChatSession, DomainError> {
    let get = |e: sqlx::Error| DomainError::database("Failed to read chat session row", e);

    let session_id: uuid::Uuid = row.try_get("session_id").map_err(get)?;
    let user_id: uuid::Uuid = row.try_get("user_id").map_err(get)?;
    let messages: Json<Vec<ChatMessage>> = row.try_get("messages").map_err(get)?;
    let stage: String = row.try_get("current_stage").map_err(get)?;
    let profile: Json<Profile> = row.try_get("extracted_data").map_err(get)?;
    let is_completed: bool = row.try_get("is_completed").map_err(get)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(get)?;
    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(get)?;

    let stage: Stage = stage.parse().map_err(|e: String| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored stage: {}", e))
    })?;

    Ok(ChatSession::reconstitute(
        SessionId::from_uuid(session_id),
        UserId::from_uuid(user_id),
        messages.0,
        stage,
        profile.0,
        is_completed,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

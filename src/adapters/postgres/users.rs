//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::document::UserRecord;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::profile::{non_blank, PersonalInfo};
use crate::ports::UserRepository;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &UserRecord) -> Result<(), DomainError> {
        let p = &user.personal;
        sqlx::query(
            r#"
            INSERT INTO users (
                id, session_id, first_name, last_name, email, phone, date_of_birth,
                nationality, address, city, country, postal_code, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.session_id.as_uuid())
        .bind(non_blank(&p.first_name))
        .bind(non_blank(&p.last_name))
        .bind(non_blank(&p.email))
        .bind(non_blank(&p.phone))
        .bind(non_blank(&p.date_of_birth))
        .bind(non_blank(&p.nationality))
        .bind(non_blank(&p.address))
        .bind(non_blank(&p.city))
        .bind(non_blank(&p.country))
        .bind(non_blank(&p.postal_code))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert user", e))?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<UserRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, first_name, last_name, email, phone, date_of_birth,
                   nationality, address, city, country, postal_code, created_at, updated_at
            FROM users
            WHERE session_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn update_personal_info(
        &self,
        user_id: &UserId,
        info: &PersonalInfo,
    ) -> Result<(), DomainError> {
        // Blank parameters arrive as NULL and keep the stored value.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                first_name    = COALESCE($2, first_name),
                last_name     = COALESCE($3, last_name),
                email         = COALESCE($4, email),
                phone         = COALESCE($5, phone),
                date_of_birth = COALESCE($6, date_of_birth),
                nationality   = COALESCE($7, nationality),
                address       = COALESCE($8, address),
                city          = COALESCE($9, city),
                country       = COALESCE($10, country),
                postal_code   = COALESCE($11, postal_code),
                updated_at    = $12
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(non_blank(&info.first_name))
        .bind(non_blank(&info.last_name))
        .bind(non_blank(&info.email))
        .bind(non_blank(&info.phone))
        .bind(non_blank(&info.date_of_birth))
        .bind(non_blank(&info.nationality))
        .bind(non_blank(&info.address))
        .bind(non_blank(&info.city))
        .bind(non_blank(&info.country))
        .bind(non_blank(&info.postal_code))
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user_id),
            ));
        }
        Ok(())
    }
}

fn row_to_user(row: PgRow) -> Result<UserRecord, DomainError> {
    let get = |e: sqlx::Error| DomainError::database("Failed to read user row", e);

    let personal = PersonalInfo {
        first_name: row.try_get("first_name").map_err(get)?,
        last_name: row.try_get("last_name").map_err(get)?,
        email: row.try_get("email").map_err(get)?,
        phone: row.try_get("phone").map_err(get)?,
        date_of_birth: row.try_get("date_of_birth").map_err(get)?,
        nationality: row.try_get("nationality").map_err(get)?,
        address: row.try_get("address").map_err(get)?,
        city: row.try_get("city").map_err(get)?,
        country: row.try_get("country").map_err(get)?,
        postal_code: row.try_get("postal_code").map_err(get)?,
    };

    let id: uuid::Uuid = row.try_get("id").map_err(get)?;
    let session_id: uuid::Uuid = row.try_get("session_id").map_err(get)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(get)?;
    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(get)?;

    Ok(UserRecord {
        id: UserId::from_uuid(id),
        session_id: SessionId::from_uuid(session_id),
        personal,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

//! PostgreSQL adapters.
//!
//! Repositories share one `PgPool`. The schema lives in `migrations/` and
//! is embedded at compile time.

mod chat_sessions;
mod profiles;
mod users;

pub use chat_sessions::PostgresChatSessionRepository;
pub use profiles::PostgresProfileRepository;
pub use users::PostgresUserRepository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a connection pool sized by the configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(config.url())
        .await
        .map_err(|e| DomainError::database("PostgreSQL connection failed", e))?;

    tracing::info!(
        max_connections = config.max_connections,
        "connected to PostgreSQL"
    );
    Ok(pool)
}

/// Applies pending schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database("Migration failed", e))?;

    tracing::info!("database migrations applied");
    Ok(())
}

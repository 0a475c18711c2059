//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `CV_BUILDER` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use cv_builder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod renderer;
mod server;

pub use ai::{AiConfig, OracleKind};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use renderer::RendererConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; in-memory repositories are used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub renderer: RendererConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CV_BUILDER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `CV_BUILDER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CV_BUILDER__DATABASE__URL=...` -> `database.url = ...`
    /// - `CV_BUILDER__AI__ORACLE=live` -> `ai.oracle = live`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CV_BUILDER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.ai.validate()?;
        self.renderer.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

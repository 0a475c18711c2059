//! cv-builder server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cv_builder::adapters::ai::{AnthropicConfig, AnthropicProvider};
use cv_builder::adapters::memory::{
    InMemoryChatSessionRepository, InMemoryProfileRepository, InMemoryUserRepository,
};
use cv_builder::adapters::oracle::{LlmExtractionOracle, RuleBasedOracle};
use cv_builder::adapters::postgres::{
    self, PostgresChatSessionRepository, PostgresProfileRepository, PostgresUserRepository,
};
use cv_builder::adapters::rendering::WkhtmltopdfLauncher;
use cv_builder::app::{build_router, AppDependencies};
use cv_builder::config::{AiConfig, AppConfig, OracleKind};
use cv_builder::ports::{AIProvider, ExtractionOracle};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let deps = dependencies(&config).await?;
    let app = build_router(deps, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "cv-builder listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cv-builder stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn dependencies(config: &AppConfig) -> Result<AppDependencies, BoxError> {
    let oracle = oracle(&config.ai)?;
    let launcher = Arc::new(
        WkhtmltopdfLauncher::new(config.renderer.binary.clone())
            .with_dpi(config.renderer.dpi)
            .with_timeout(config.renderer.timeout()),
    );

    let deps = match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            if database.run_migrations {
                postgres::migrate(&pool).await?;
            }
            AppDependencies {
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
                chats: Arc::new(PostgresChatSessionRepository::new(pool)),
                oracle,
                launcher,
            }
        }
        None => {
            tracing::warn!("no database configured, sessions are kept in memory");
            AppDependencies {
                users: Arc::new(InMemoryUserRepository::new()),
                profiles: Arc::new(InMemoryProfileRepository::new()),
                chats: Arc::new(InMemoryChatSessionRepository::new()),
                oracle,
                launcher,
            }
        }
    };

    Ok(deps)
}

fn oracle(config: &AiConfig) -> Result<Arc<dyn ExtractionOracle>, BoxError> {
    match config.oracle {
        OracleKind::RuleBased => {
            tracing::info!("using rule-based extraction oracle");
            Ok(Arc::new(RuleBasedOracle::new()))
        }
        OracleKind::Live => {
            let key = config
                .anthropic_api_key
                .clone()
                .ok_or("ai.anthropic_api_key is required for the live oracle")?;

            let mut anthropic = AnthropicConfig::from_secret(key)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                anthropic = anthropic.with_model(model.clone());
            }
            if let Some(base_url) = &config.base_url {
                anthropic = anthropic.with_base_url(base_url.clone());
            }

            let provider = AnthropicProvider::new(anthropic)?;
            let info = provider.provider_info();
            tracing::info!(provider = %info.name, model = %info.model, "using live extraction oracle");
            Ok(Arc::new(LlmExtractionOracle::new(Arc::new(provider))))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

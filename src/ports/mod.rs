//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Oracle Ports
//!
//! - `ExtractionOracle` - Structured data extraction, follow-up questions, summaries
//! - `AIProvider` - LLM completions used by the live oracle
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Users keyed by chat session id
//! - `ProfileRepository` - CV profiles and their collection entries
//! - `ChatSessionRepository` - Chat session log and accumulated profile
//!
//! ## Rendering Ports
//!
//! - `RenderingEngineLauncher` / `RenderingEngine` - HTML to paginated document

mod ai_provider;
mod chat_session_repository;
mod extraction_oracle;
mod profile_repository;
mod rendering_engine;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use chat_session_repository::ChatSessionRepository;
pub use extraction_oracle::{ExtractionOracle, OracleError};
pub use profile_repository::ProfileRepository;
pub use rendering_engine::{
    PageSettings, PageSize, RenderError, RenderingEngine, RenderingEngineLauncher,
};
pub use user_repository::UserRepository;

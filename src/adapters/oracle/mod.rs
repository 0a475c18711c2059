//! Extraction oracle adapters.
//!
//! - `RuleBasedOracle` - deterministic pattern matching, no network
//! - `LlmExtractionOracle` - prompts an `AIProvider` and cleans its replies

mod llm_oracle;
mod rule_based;

pub use llm_oracle::{LlmExtractionOracle, FALLBACK_QUESTION};
pub use rule_based::RuleBasedOracle;

//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Claude models
//! - `MockAIProvider` - Scriptable provider for unit tests

mod anthropic_provider;
#[cfg(test)]
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
#[cfg(test)]
pub use mock_provider::{MockAIProvider, MockError, MockResponse};

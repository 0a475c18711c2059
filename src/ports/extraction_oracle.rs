//! Extraction Oracle Port - turns free text into structured profile data.
//!
//! The oracle is opaque to the core: it may be a deterministic pattern
//! matcher or a live language-model service. Both honor the same contract:
//!
//! - `extract` returns a [`ProfileFragment`]; an empty fragment means
//!   "nothing found" and is a success
//! - `next_prompt` words the follow-up questions for a profile and stage
//! - `summarize` writes a short professional summary
//!
//! Failures are reported as [`OracleError`], distinct from empty results.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::profile::{Profile, ProfileFragment};
use crate::domain::session::{NextPrompt, Stage};
use crate::ports::AIError;

#[async_trait]
pub trait ExtractionOracle: Send + Sync {
    /// Extract whatever profile data one utterance contains.
    async fn extract(&self, utterance: &str) -> Result<ProfileFragment, OracleError>;

    /// Generate up to three follow-up questions for the current profile.
    async fn next_prompt(&self, profile: &Profile, stage: Stage) -> Result<NextPrompt, OracleError>;

    /// Write a professional summary of the profile.
    async fn summarize(&self, profile: &Profile) -> Result<String, OracleError>;
}

/// Oracle failures.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The backing service failed (network, auth, timeout, ...).
    #[error("oracle provider failed: {0}")]
    Provider(#[from] AIError),

    /// The service answered with something that does not fit the contract.
    #[error("malformed oracle output: {0}")]
    MalformedOutput(String),

    /// The service answered with nothing where text was required.
    #[error("oracle returned an empty response")]
    EmptyResponse,
}

impl OracleError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedOutput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_oracle_is_object_safe() {
        fn _accepts_dyn(_oracle: &dyn ExtractionOracle) {}
    }

    #[test]
    fn provider_errors_convert() {
        let err: OracleError = AIError::AuthenticationFailed.into();
        assert!(matches!(err, OracleError::Provider(_)));
        assert_eq!(err.to_string(), "oracle provider failed: authentication failed");
    }
}

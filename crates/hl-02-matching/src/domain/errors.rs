//! Error types for the matching engine.

use thiserror::Error;

/// Errors surfaced by match and nearby queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A query field failed validation. Synchronous and non-retryable
    /// until the caller fixes the input.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The search ran out of time budget before completing. Distinct from
    /// an empty result; nothing partial is returned.
    #[error("matching timed out before the search completed")]
    Timeout,

    /// The engine itself failed in an unexpected way.
    #[error("matching internal failure: {0}")]
    Internal(String),
}

impl MatchError {
    /// Helper for field validation failures.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MatchError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

//! Lifecycle error types.

use shared_types::RequestId;
use thiserror::Error;

/// Errors surfaced by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    /// A request field or the proof document failed validation.
    /// Non-retryable until the caller fixes the input.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A store (blob or request) failed. The request record was not
    /// committed; an identical resubmission is safe.
    #[error("request store failure: {0}")]
    Storage(String),

    /// The matching engine failed unexpectedly. Distinct from storage
    /// so operators can tell the two apart; resubmission is safe here
    /// too.
    #[error("matching failed during submission: {0}")]
    Matching(String),

    /// No request with this id exists.
    #[error("request not found: {request_id}")]
    NotFound { request_id: RequestId },
}

impl LifecycleError {
    /// Helper for field validation failures.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LifecycleError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

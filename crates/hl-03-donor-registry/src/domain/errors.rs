//! Registry error types.

use shared_types::DonorId;
use thiserror::Error;

/// Errors surfaced by registry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A submission field failed validation. Non-retryable until the
    /// caller fixes the input.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The email is already claimed by a registered donor (active or
    /// deactivated; addresses are never recycled).
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },

    /// No donor with this id exists.
    #[error("donor not found: {donor_id}")]
    NotFound { donor_id: DonorId },

    /// The donor exists but has been deactivated; mutation is refused.
    #[error("donor is deactivated: {donor_id}")]
    Deactivated { donor_id: DonorId },

    /// The durable store failed. Nothing was applied; an identical
    /// retry is safe.
    #[error("donor store failure: {0}")]
    Storage(String),
}

impl RegistryError {
    /// Helper for field validation failures.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RegistryError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

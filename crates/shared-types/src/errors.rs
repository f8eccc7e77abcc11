//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors surfaced by persistence ports (donor store, request store,
/// blob store). Adapters translate backend-specific failures into these.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Record not present in the store.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Write rejected because it would violate a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend itself failed (I/O, connection, corruption).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

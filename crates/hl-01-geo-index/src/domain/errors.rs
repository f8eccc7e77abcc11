//! Error types for the geo index.

use thiserror::Error;

use super::cell::{MAX_CELL_SIZE_DEG, MIN_CELL_SIZE_DEG};

/// Errors produced by index construction and queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoIndexError {
    /// Cell size outside the supported range.
    #[error(
        "cell size {0} degrees outside supported range \
         [{MIN_CELL_SIZE_DEG}, {MAX_CELL_SIZE_DEG}]"
    )]
    InvalidCellSize(f64),

    /// Radius not positive and finite.
    #[error("search radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// The caller's deadline passed mid-search. No partial result is
    /// returned.
    #[error("search deadline exceeded after scanning {rings_scanned} rings")]
    DeadlineExceeded { rings_scanned: u32 },
}

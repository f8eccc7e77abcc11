//! # Inbound Port - MatchingApi
//!
//! Primary driving port exposing donor matching. The request lifecycle
//! manager drives `match_donors` at submission time; the public donor-map
//! surface drives `nearby_donors`.

use shared_types::MatchedDonor;

use crate::domain::{MatchError, MatchQuery, NearbyQuery};

/// Primary API for the Matching Engine subsystem.
///
/// Both operations are pure reads: no donor record and no index entry is
/// mutated by a query. Zero matches is a success, not an error.
pub trait MatchingApi: Send + Sync {
    /// Finds compatible donors around a request origin, sorted by
    /// (distance asc, donor id asc).
    ///
    /// # Errors
    /// - `InvalidInput`: radius outside (0, max] or a zero result cap
    /// - `Timeout`: the time budget expired mid-search; no partial list
    ///   is returned
    fn match_donors(&self, query: MatchQuery) -> Result<Vec<MatchedDonor>, MatchError>;

    /// Finds donors of every blood type around a point. Same contract as
    /// [`match_donors`](Self::match_donors), with the compatibility
    /// filter wide open.
    fn nearby_donors(&self, query: NearbyQuery) -> Result<Vec<MatchedDonor>, MatchError>;
}

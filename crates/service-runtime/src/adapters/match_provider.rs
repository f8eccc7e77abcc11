//! # Match Provider Adapter
//!
//! Implements the request lifecycle's `MatchProvider` port over the
//! matching engine. Submission-time matches run at the engine's
//! configured default radius with no caller deadline, so a submission
//! only sees matching fail when the engine itself does.

use std::sync::Arc;

use hl_02_matching::{MatchQuery, MatchingApi, MatchingService};
use hl_04_request_lifecycle::{MatchProvider, MatchProviderError};
use shared_types::{BloodType, Coordinate, MatchedDonor};

/// Routes submission-time matching into the matching engine.
pub struct MatchProviderAdapter {
    matching: Arc<MatchingService>,
}

impl MatchProviderAdapter {
    pub fn new(matching: Arc<MatchingService>) -> Self {
        Self { matching }
    }
}

impl MatchProvider for MatchProviderAdapter {
    fn find_matches(
        &self,
        origin: Coordinate,
        blood_type: BloodType,
    ) -> Result<Vec<MatchedDonor>, MatchProviderError> {
        let query = MatchQuery {
            origin,
            blood_type,
            radius_km: self.matching.config().default_radius_km,
            max_results: None,
            timeout: None,
        };
        self.matching
            .match_donors(query)
            .map_err(|err| MatchProviderError(err.to_string()))
    }
}

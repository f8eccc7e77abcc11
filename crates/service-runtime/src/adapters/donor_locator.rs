//! # Donor Locator Adapter
//!
//! Implements the matching engine's `DonorLocator` port over the geo
//! index. Proximity hits become matching candidates; an index deadline
//! abort becomes the locator's `DeadlineExceeded`.

use std::sync::Arc;

use hl_01_geo_index::{GeoIndex, GeoIndexError};
use hl_02_matching::{Candidate, DonorLocator, LocateError};
use shared_types::{BloodTypeSet, Coordinate, Deadline};

/// Routes candidate discovery into the geo index.
pub struct DonorLocatorAdapter {
    index: Arc<GeoIndex>,
}

impl DonorLocatorAdapter {
    pub fn new(index: Arc<GeoIndex>) -> Self {
        Self { index }
    }
}

impl DonorLocator for DonorLocatorAdapter {
    fn find_within(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: BloodTypeSet,
        deadline: Deadline,
    ) -> Result<Vec<Candidate>, LocateError> {
        let hits = self
            .index
            .query(origin, radius_km, filter, deadline)
            .map_err(|err| match err {
                GeoIndexError::DeadlineExceeded { .. } => LocateError::DeadlineExceeded,
                other => LocateError::Internal(other.to_string()),
            })?;

        Ok(hits
            .into_iter()
            .map(|hit| Candidate {
                donor_id: hit.donor_id,
                distance_km: hit.distance_km,
                blood_type: hit.blood_type,
            })
            .collect())
    }
}

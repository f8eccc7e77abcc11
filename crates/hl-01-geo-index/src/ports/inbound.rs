//! # Inbound Port - GeoIndexApi
//!
//! Primary driving port exposing the geo index. The donor registry drives
//! the write methods through its location projection; the matching engine
//! drives `query` through its locator.

use shared_types::{BloodType, BloodTypeSet, Coordinate, Deadline, DonorId};

use crate::domain::{
    BulkEntry, GeoIndex, GeoIndexError, GeoIndexStats, ProximityHit, UpsertOutcome,
};

/// Primary API for the Geo Index subsystem.
///
/// All methods take `&self`; the implementation is internally synchronized
/// and safe to share behind an `Arc`.
pub trait GeoIndexApi: Send + Sync {
    /// Inserts or relocates a donor. Idempotent.
    fn upsert(
        &self,
        donor_id: DonorId,
        location: Coordinate,
        blood_type: BloodType,
    ) -> UpsertOutcome;

    /// Removes a donor from the index. Returns false when absent.
    fn remove(&self, donor_id: DonorId) -> bool;

    /// Finds donors within `radius_km` of `origin` whose blood type is in
    /// `filter`, sorted by (distance asc, donor id asc).
    ///
    /// # Errors
    /// - `InvalidRadius`: radius not positive and finite
    /// - `DeadlineExceeded`: the deadline passed mid-search; no partial
    ///   result is returned
    fn query(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: BloodTypeSet,
        deadline: Deadline,
    ) -> Result<Vec<ProximityHit>, GeoIndexError>;

    /// Loads a batch of donors in parallel. Used for the startup rebuild.
    fn bulk_load(&self, entries: Vec<BulkEntry>) -> usize;

    /// True when the donor is currently indexed.
    fn contains(&self, donor_id: DonorId) -> bool;

    /// Number of indexed donors.
    fn len(&self) -> usize;

    /// True when no donor is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time counters.
    fn stats(&self) -> GeoIndexStats;
}

impl GeoIndexApi for GeoIndex {
    fn upsert(
        &self,
        donor_id: DonorId,
        location: Coordinate,
        blood_type: BloodType,
    ) -> UpsertOutcome {
        GeoIndex::upsert(self, donor_id, location, blood_type)
    }

    fn remove(&self, donor_id: DonorId) -> bool {
        GeoIndex::remove(self, donor_id)
    }

    fn query(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: BloodTypeSet,
        deadline: Deadline,
    ) -> Result<Vec<ProximityHit>, GeoIndexError> {
        GeoIndex::query(self, origin, radius_km, filter, deadline)
    }

    fn bulk_load(&self, entries: Vec<BulkEntry>) -> usize {
        GeoIndex::bulk_load(self, entries)
    }

    fn contains(&self, donor_id: DonorId) -> bool {
        GeoIndex::contains(self, donor_id)
    }

    fn len(&self) -> usize {
        GeoIndex::len(self)
    }

    fn is_empty(&self) -> bool {
        GeoIndex::is_empty(self)
    }

    fn stats(&self) -> GeoIndexStats {
        GeoIndex::stats(self)
    }
}

//! # Geo Projection Adapter
//!
//! Implements the registry's `LocationProjection` port over the geo
//! index, so every accepted registration, move, and deactivation lands
//! in the searchable index without the registry knowing the index
//! exists.

use std::sync::Arc;

use tracing::debug;

use hl_01_geo_index::{BulkEntry, GeoIndex};
use hl_03_donor_registry::{LocationProjection, ProjectionEntry};
use shared_types::{BloodType, Coordinate, DonorId};

/// Routes registry projection calls into the geo index.
pub struct GeoProjectionAdapter {
    index: Arc<GeoIndex>,
}

impl GeoProjectionAdapter {
    pub fn new(index: Arc<GeoIndex>) -> Self {
        Self { index }
    }
}

impl LocationProjection for GeoProjectionAdapter {
    fn upsert(&self, donor_id: DonorId, location: Coordinate, blood_type: BloodType) {
        let outcome = self.index.upsert(donor_id, location, blood_type);
        debug!(%donor_id, ?outcome, "projected donor into geo index");
    }

    fn remove(&self, donor_id: DonorId) {
        let removed = self.index.remove(donor_id);
        debug!(%donor_id, removed, "removed donor from geo index");
    }

    fn bulk_load(&self, entries: Vec<ProjectionEntry>) -> usize {
        let entries: Vec<BulkEntry> = entries
            .into_iter()
            .map(|e| BulkEntry {
                donor_id: e.donor_id,
                location: e.location,
                blood_type: e.blood_type,
            })
            .collect();
        self.index.bulk_load(entries)
    }
}

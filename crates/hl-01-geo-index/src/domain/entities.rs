//! Entities and value objects for the geo index.

use serde::{Deserialize, Serialize};
use shared_types::{BloodType, Coordinate, DonorId};

use super::cell::CellKey;

/// What the index stores per donor inside a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellEntry {
    /// Exact position, used by the haversine filter.
    pub location: Coordinate,
    /// Carried so queries can filter without a registry round trip.
    pub blood_type: BloodType,
}

/// Tracks which cell currently holds a donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: CellKey,
}

/// One donor produced by a proximity query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityHit {
    pub donor_id: DonorId,
    /// Exact haversine distance from the query origin, in km.
    pub distance_km: f64,
    pub blood_type: BloodType,
}

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Donor was not in the index before.
    Inserted,
    /// Donor changed cells.
    Moved,
    /// Donor stayed in its cell; entry data refreshed.
    Refreshed,
}

/// One record for [`bulk_load`](super::index::GeoIndex::bulk_load).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulkEntry {
    pub donor_id: DonorId,
    pub location: Coordinate,
    pub blood_type: BloodType,
}

/// Point-in-time counters for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeoIndexStats {
    /// Donors currently placed.
    pub donors: usize,
    /// Cells holding at least one donor.
    pub occupied_cells: usize,
    /// Upserts accepted since construction.
    pub upserts: u64,
    /// Removals that found a donor since construction.
    pub removals: u64,
}

/// Geo index tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoIndexConfig {
    /// Cell edge length in degrees. 1.0 keeps a 500 km query inside a
    /// handful of rings while cells stay small enough to prune well.
    pub cell_size_deg: f64,
}

impl Default for GeoIndexConfig {
    fn default() -> Self {
        GeoIndexConfig { cell_size_deg: 1.0 }
    }
}

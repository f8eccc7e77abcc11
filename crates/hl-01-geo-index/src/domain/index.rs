//! The concurrent geo index.
//!
//! Two maps, always touched in the same order:
//!
//! - `placements`: donor id → current cell. The entry lock is the
//!   serialization point for all writes concerning one donor.
//! - `cells`: cell key → `BTreeMap<DonorId, CellEntry>`. BTreeMap keeps
//!   per-cell iteration deterministic.
//!
//! Lock order is placements shard, then cells shard. Queries touch only
//! `cells` with read guards, so readers never block readers.
//!
//! A relocation inserts into the new cell before removing from the old
//! one. A query racing it can therefore see the donor twice but never
//! zero times; callers dedupe by donor id.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rayon::prelude::*;
use shared_types::{BloodType, BloodTypeSet, Coordinate, Deadline, DonorId};
use tracing::{debug, info};

use super::cell::{CellKey, Grid};
use super::entities::{
    BulkEntry, CellEntry, GeoIndexConfig, GeoIndexStats, Placement, ProximityHit, UpsertOutcome,
};
use super::errors::GeoIndexError;
use super::geo::haversine_km;

type Cell = BTreeMap<DonorId, CellEntry>;

/// Concurrent grid index over donor locations.
pub struct GeoIndex {
    grid: Grid,
    cells: DashMap<CellKey, Cell>,
    placements: DashMap<DonorId, Placement>,
    upserts: AtomicU64,
    removals: AtomicU64,
}

impl GeoIndex {
    /// Builds an empty index with the given configuration.
    pub fn new(config: GeoIndexConfig) -> Result<Self, GeoIndexError> {
        Ok(GeoIndex {
            grid: Grid::new(config.cell_size_deg)?,
            cells: DashMap::new(),
            placements: DashMap::new(),
            upserts: AtomicU64::new(0),
            removals: AtomicU64::new(0),
        })
    }

    /// Inserts or relocates a donor. Idempotent; re-upserting the same
    /// position refreshes the stored entry.
    pub fn upsert(
        &self,
        donor_id: DonorId,
        location: Coordinate,
        blood_type: BloodType,
    ) -> UpsertOutcome {
        let new_key = self.grid.cell_of(location);
        let entry = CellEntry { location, blood_type };
        self.upserts.fetch_add(1, Ordering::Relaxed);

        // Holding the placement entry serializes writes for this donor.
        match self.placements.entry(donor_id) {
            Entry::Occupied(mut placed) => {
                let old_key = placed.get().cell;
                self.cells.entry(new_key).or_default().insert(donor_id, entry);
                if old_key == new_key {
                    return UpsertOutcome::Refreshed;
                }
                // Insert into the new cell happened above; only now drop
                // the stale entry so the donor is never absent from both.
                if let Some(mut old_cell) = self.cells.get_mut(&old_key) {
                    old_cell.remove(&donor_id);
                }
                self.cells.remove_if(&old_key, |_, cell| cell.is_empty());
                placed.get_mut().cell = new_key;
                UpsertOutcome::Moved
            }
            Entry::Vacant(vacant) => {
                self.cells.entry(new_key).or_default().insert(donor_id, entry);
                vacant.insert(Placement { cell: new_key });
                UpsertOutcome::Inserted
            }
        }
    }

    /// Removes a donor. Returns false when the donor was not indexed.
    pub fn remove(&self, donor_id: DonorId) -> bool {
        let removed_from = match self.placements.entry(donor_id) {
            Entry::Occupied(placed) => {
                let key = placed.get().cell;
                if let Some(mut cell) = self.cells.get_mut(&key) {
                    cell.remove(&donor_id);
                }
                placed.remove();
                Some(key)
            }
            Entry::Vacant(_) => None,
        };
        match removed_from {
            Some(key) => {
                self.cells.remove_if(&key, |_, cell| cell.is_empty());
                self.removals.fetch_add(1, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Finds all donors within `radius_km` of `origin` whose blood type is
    /// in `filter`, sorted by (distance asc, donor id asc).
    ///
    /// An empty result is success. An expired deadline aborts the ring
    /// walk with [`GeoIndexError::DeadlineExceeded`]; nothing partial is
    /// ever returned. A donor relocating concurrently may appear twice.
    pub fn query(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: BloodTypeSet,
        deadline: Deadline,
    ) -> Result<Vec<ProximityHit>, GeoIndexError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(GeoIndexError::InvalidRadius(radius_km));
        }
        if filter.is_empty() {
            return Ok(Vec::new());
        }

        let origin_cell = self.grid.cell_of(origin);
        let mut hits = Vec::new();
        let mut ring = 0;
        loop {
            if deadline.is_expired() {
                debug!(rings_scanned = ring, "proximity query aborted by deadline");
                return Err(GeoIndexError::DeadlineExceeded { rings_scanned: ring });
            }

            let keys = self.grid.ring(origin_cell, ring as i32);
            // A ring none of whose cells can reach the radius means no
            // later ring can either; an empty ring means the grid ended.
            let mut ring_reachable = false;
            for key in keys {
                if self.grid.min_distance_km(origin, key) > radius_km {
                    continue;
                }
                ring_reachable = true;
                let Some(cell) = self.cells.get(&key) else {
                    continue;
                };
                for (donor_id, entry) in cell.iter() {
                    if !filter.contains(entry.blood_type) {
                        continue;
                    }
                    let distance_km = haversine_km(origin, entry.location);
                    if distance_km <= radius_km {
                        hits.push(ProximityHit {
                            donor_id: *donor_id,
                            distance_km,
                            blood_type: entry.blood_type,
                        });
                    }
                }
            }
            if ring > 0 && !ring_reachable {
                break;
            }
            ring += 1;
        }

        hits.sort_unstable_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.donor_id.cmp(&b.donor_id))
        });
        Ok(hits)
    }

    /// Loads a batch of donors in parallel. Used for the startup rebuild.
    pub fn bulk_load(&self, entries: Vec<BulkEntry>) -> usize {
        let count = entries.len();
        entries
            .into_par_iter()
            .for_each(|e| {
                self.upsert(e.donor_id, e.location, e.blood_type);
            });
        info!(donors = count, "geo index bulk load complete");
        count
    }

    /// True when the donor is currently indexed.
    pub fn contains(&self, donor_id: DonorId) -> bool {
        self.placements.contains_key(&donor_id)
    }

    /// Number of indexed donors.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// True when no donor is indexed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Point-in-time counters.
    pub fn stats(&self) -> GeoIndexStats {
        GeoIndexStats {
            donors: self.placements.len(),
            occupied_cells: self.cells.len(),
            upserts: self.upserts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
        }
    }
}

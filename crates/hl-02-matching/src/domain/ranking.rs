//! Dedupe and deterministic ordering of match results.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use shared_types::{DonorId, MatchedDonor};

use super::entities::Candidate;

/// Collapses duplicate donor observations, keeping the nearest one.
///
/// Duplicates arise when a donor relocates while the index query is in
/// flight and both the old and the new cell get scanned.
pub fn dedupe_nearest(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut best: HashMap<DonorId, Candidate> = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        match best.entry(candidate.donor_id) {
            Entry::Occupied(mut seen) => {
                if candidate.distance_km < seen.get().distance_km {
                    seen.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }
    best.into_values().collect()
}

/// Sorts result rows by (distance asc, donor id asc).
pub fn rank(rows: &mut [MatchedDonor]) {
    rows.sort_unstable_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.donor_id.cmp(&b.donor_id))
    });
}

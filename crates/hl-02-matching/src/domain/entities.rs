//! Query types and configuration for the matching engine.

use std::time::Duration;

use shared_types::{BloodType, Coordinate, DonorId};

/// Hard ceiling on any search radius, in kilometers.
pub const MAX_RADIUS_KM: f64 = 500.0;

/// Radius used when a caller does not supply one, in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// One donor observation produced by candidate discovery, before
/// hydration and ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub donor_id: DonorId,
    /// Distance from the query origin, in km.
    pub distance_km: f64,
    /// Blood type as recorded by the discovery source.
    pub blood_type: BloodType,
}

/// A request-driven donor search.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    /// Where the blood is needed.
    pub origin: Coordinate,
    /// Requested blood type; the compatibility policy widens it.
    pub blood_type: BloodType,
    /// Search radius, must lie in (0, MAX_RADIUS_KM].
    pub radius_km: f64,
    /// Cap on returned donors. `None` returns everyone in range.
    pub max_results: Option<usize>,
    /// Per-call time budget. `None` falls back to the configured default.
    pub timeout: Option<Duration>,
}

/// A donor-map search: every blood type, around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub origin: Coordinate,
    /// `None` uses the configured default radius.
    pub radius_km: Option<f64>,
    pub max_results: Option<usize>,
    pub timeout: Option<Duration>,
}

/// Matching engine tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    /// Radius applied when a query leaves it unset.
    pub default_radius_km: f64,
    /// Upper bound accepted for any query radius.
    pub max_radius_km: f64,
    /// Time budget applied when a query carries no timeout. `None` means
    /// searches run unbounded.
    pub default_timeout: Option<Duration>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            default_radius_km: DEFAULT_RADIUS_KM,
            max_radius_km: MAX_RADIUS_KM,
            default_timeout: None,
        }
    }
}

impl MatchingConfig {
    /// Tight limits for deterministic tests.
    pub fn for_testing() -> Self {
        MatchingConfig {
            default_radius_km: 50.0,
            max_radius_km: 500.0,
            default_timeout: None,
        }
    }
}

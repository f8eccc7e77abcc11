//! Outbound (Driven) ports for the Matching Engine subsystem.
//!
//! These traits define what the engine needs from the rest of the system:
//! a way to discover candidates near a point and a way to resolve donor
//! records. The runtime provides adapters over the geo index and the
//! donor registry.

use shared_types::{BloodTypeSet, Coordinate, Deadline, Donor, DonorId};
use thiserror::Error;

use crate::domain::Candidate;

/// Failures surfaced by candidate discovery.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    /// The deadline passed before the search completed.
    #[error("candidate search deadline exceeded")]
    DeadlineExceeded,

    /// The discovery backend failed outright.
    #[error("candidate discovery failed: {0}")]
    Internal(String),
}

/// Finds donors near a point.
///
/// Implementations must return every donor within the radius whose blood
/// type is in `filter`, may return the same donor twice while it
/// relocates, and must abort with `DeadlineExceeded` rather than return
/// a silently truncated list.
pub trait DonorLocator: Send + Sync {
    fn find_within(
        &self,
        origin: Coordinate,
        radius_km: f64,
        filter: BloodTypeSet,
        deadline: Deadline,
    ) -> Result<Vec<Candidate>, LocateError>;
}

/// Resolves donor records in bulk.
///
/// Position `i` of the result corresponds to `ids[i]`. Unknown and
/// deactivated donors come back `None`; the engine drops them from
/// results.
pub trait DonorDirectory: Send + Sync {
    fn hydrate(&self, ids: &[DonorId]) -> Vec<Option<Donor>>;
}

/// Mock locator for testing.
#[cfg(test)]
pub struct MockLocator {
    result: Result<Vec<Candidate>, LocateError>,
    pub calls: std::sync::Mutex<Vec<LocateCall>>,
}

/// Arguments captured from one `find_within` call.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct LocateCall {
    pub radius_km: f64,
    pub filter: BloodTypeSet,
    pub bounded: bool,
}

#[cfg(test)]
impl MockLocator {
    pub fn returning(candidates: Vec<Candidate>) -> Self {
        Self {
            result: Ok(candidates),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LocateError) -> Self {
        Self {
            result: Err(error),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn last_call(&self) -> Option<LocateCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl DonorLocator for MockLocator {
    fn find_within(
        &self,
        _origin: Coordinate,
        radius_km: f64,
        filter: BloodTypeSet,
        deadline: Deadline,
    ) -> Result<Vec<Candidate>, LocateError> {
        self.calls.lock().unwrap().push(LocateCall {
            radius_km,
            filter,
            bounded: deadline != Deadline::NONE,
        });
        self.result.clone()
    }
}

/// Mock directory for testing.
#[cfg(test)]
pub struct MockDirectory {
    donors: std::collections::HashMap<DonorId, Donor>,
}

#[cfg(test)]
impl MockDirectory {
    pub fn new() -> Self {
        Self {
            donors: std::collections::HashMap::new(),
        }
    }

    pub fn with_donor(mut self, donor: Donor) -> Self {
        self.donors.insert(donor.id, donor);
        self
    }
}

#[cfg(test)]
impl DonorDirectory for MockDirectory {
    fn hydrate(&self, ids: &[DonorId]) -> Vec<Option<Donor>> {
        ids.iter()
            .map(|id| self.donors.get(id).filter(|d| d.is_active()).cloned())
            .collect()
    }
}

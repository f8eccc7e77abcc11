//! Outbound (Driven) ports for the Donor Registry subsystem.
//!
//! These traits define what the registry needs from the rest of the
//! system: durable record storage, a sink for the searchable location
//! projection, and a clock. The runtime provides the adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{BloodType, Coordinate, Donor, DonorId, StoreError};

use crate::domain::ProjectionEntry;

/// Durable donor record storage, keyed by donor id.
///
/// `put` is an upsert: it covers both the initial write and every later
/// edit. Implementations must be atomic per record — a failed `put`
/// leaves the previous version readable.
#[async_trait]
pub trait DonorStore: Send + Sync {
    async fn put(&self, donor: &Donor) -> Result<(), StoreError>;

    /// Every stored record, any status, unordered. Startup replay only.
    async fn load_all(&self) -> Result<Vec<Donor>, StoreError>;
}

/// Sink for the searchable location projection (the geo index, behind
/// an adapter).
///
/// Projection calls happen after the durable write succeeded, so the
/// projection can lag the store but never lead it. Upserts are
/// idempotent; removing an absent donor is a no-op.
pub trait LocationProjection: Send + Sync {
    fn upsert(&self, donor_id: DonorId, location: Coordinate, blood_type: BloodType);

    fn remove(&self, donor_id: DonorId);

    /// Startup replay of the whole active population. Returns how many
    /// entries were loaded.
    fn bulk_load(&self, entries: Vec<ProjectionEntry>) -> usize;
}

/// Wall-clock time, injected so tests control record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock store for testing: in-memory map plus a write-failure toggle
/// for exercising the persist-before-apply ordering.
#[cfg(test)]
pub struct MockDonorStore {
    records: std::sync::Mutex<std::collections::HashMap<DonorId, Donor>>,
    fail_puts: std::sync::atomic::AtomicBool,
    fail_loads: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MockDonorStore {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(std::collections::HashMap::new()),
            fail_puts: std::sync::atomic::AtomicBool::new(false),
            fail_loads: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn with_records(donors: Vec<Donor>) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.lock().unwrap();
            for donor in donors {
                records.insert(donor.id, donor);
            }
        }
        store
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_puts
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_loads
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn stored(&self, donor_id: DonorId) -> Option<Donor> {
        self.records.lock().unwrap().get(&donor_id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl DonorStore for MockDonorStore {
    async fn put(&self, donor: &Donor) -> Result<(), StoreError> {
        if self.fail_puts.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.records.lock().unwrap().insert(donor.id, donor.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Donor>, StoreError> {
        if self.fail_loads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

/// Mock projection for testing: records every call in order.
#[cfg(test)]
pub struct MockProjection {
    pub events: std::sync::Mutex<Vec<ProjectionEvent>>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionEvent {
    Upsert {
        donor_id: DonorId,
        location: Coordinate,
        blood_type: BloodType,
    },
    Remove {
        donor_id: DonorId,
    },
    BulkLoad {
        entries: Vec<ProjectionEntry>,
    },
}

#[cfg(test)]
impl MockProjection {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<ProjectionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_event(&self) -> Option<ProjectionEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl LocationProjection for MockProjection {
    fn upsert(&self, donor_id: DonorId, location: Coordinate, blood_type: BloodType) {
        self.events.lock().unwrap().push(ProjectionEvent::Upsert {
            donor_id,
            location,
            blood_type,
        });
    }

    fn remove(&self, donor_id: DonorId) {
        self.events
            .lock()
            .unwrap()
            .push(ProjectionEvent::Remove { donor_id });
    }

    fn bulk_load(&self, entries: Vec<ProjectionEntry>) -> usize {
        let count = entries.len();
        self.events
            .lock()
            .unwrap()
            .push(ProjectionEvent::BulkLoad { entries });
        count
    }
}

/// Mock clock for testing: a fixed, settable instant.
#[cfg(test)]
pub struct FixedClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

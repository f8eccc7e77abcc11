//! Outbound (Driven) ports for the Request Lifecycle subsystem.
//!
//! These traits define what the lifecycle needs from the rest of the
//! system: a blob store for proof documents, durable request storage,
//! the matching engine, and a clock. The runtime provides the adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{BloodType, Coordinate, DocumentRef, MatchedDonor, RequestId, StoreError};
use thiserror::Error;

use crate::domain::BloodRequest;

/// Opaque storage for proof document payloads.
///
/// `put` hands back a stable handle; the bytes are never interpreted.
/// A blob may outlive the submission that wrote it (a later store
/// failure orphans it); orphans are reclaimed out of band.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<DocumentRef, StoreError>;

    async fn get(&self, document: DocumentRef) -> Result<Vec<u8>, StoreError>;
}

/// Durable request record storage, keyed by request id.
///
/// `put` must be atomic per record: after a failure nothing of the
/// request is readable.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn put(&self, request: &BloodRequest) -> Result<(), StoreError>;

    /// Every stored request, unordered. Startup replay only.
    async fn load_all(&self) -> Result<Vec<BloodRequest>, StoreError>;
}

/// Failure surfaced by the matching port.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("matching unavailable: {0}")]
pub struct MatchProviderError(pub String);

/// Runs the donor match for a submission.
///
/// Implementations search at the engine's configured default radius
/// with no caller deadline, so a submission sees matching fail only
/// when the engine itself does.
pub trait MatchProvider: Send + Sync {
    fn find_matches(
        &self,
        origin: Coordinate,
        blood_type: BloodType,
    ) -> Result<Vec<MatchedDonor>, MatchProviderError>;
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

/// Mock blob store for testing.
#[cfg(test)]
pub struct MockBlobStore {
    blobs: std::sync::Mutex<std::collections::HashMap<DocumentRef, Vec<u8>>>,
    fail_puts: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MockBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: std::sync::Mutex::new(std::collections::HashMap::new()),
            fail_puts: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_puts
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, bytes: &[u8], _extension: &str) -> Result<DocumentRef, StoreError> {
        if self.fail_puts.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Backend("injected blob failure".into()));
        }
        let reference = DocumentRef::generate();
        self.blobs.lock().unwrap().insert(reference, bytes.to_vec());
        Ok(reference)
    }

    async fn get(&self, document: DocumentRef) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .lock()
            .unwrap()
            .get(&document)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(document.to_string()))
    }
}

/// Mock request store for testing: in-memory map plus a write-failure
/// toggle for exercising all-or-nothing persistence.
#[cfg(test)]
pub struct MockRequestStore {
    records: std::sync::Mutex<std::collections::HashMap<RequestId, BloodRequest>>,
    fail_puts: std::sync::atomic::AtomicBool,
    fail_loads: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MockRequestStore {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(std::collections::HashMap::new()),
            fail_puts: std::sync::atomic::AtomicBool::new(false),
            fail_loads: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn with_records(requests: Vec<BloodRequest>) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.lock().unwrap();
            for request in requests {
                records.insert(request.id, request);
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

    pub fn stored(&self, request_id: RequestId) -> Option<BloodRequest> {
        self.records.lock().unwrap().get(&request_id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl RequestStore for MockRequestStore {
    async fn put(&self, request: &BloodRequest) -> Result<(), StoreError> {
        if self.fail_puts.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(request.id, request.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<BloodRequest>, StoreError> {
        if self.fail_loads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

/// Mock match provider for testing: settable result plus a call
/// counter for the run-exactly-once invariant.
#[cfg(test)]
pub struct MockMatchProvider {
    result: std::sync::Mutex<Result<Vec<MatchedDonor>, MatchProviderError>>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockMatchProvider {
    pub fn returning(donors: Vec<MatchedDonor>) -> Self {
        Self {
            result: std::sync::Mutex::new(Ok(donors)),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: std::sync::Mutex::new(Err(MatchProviderError(message.into()))),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn set_result(&self, donors: Vec<MatchedDonor>) {
        *self.result.lock().unwrap() = Ok(donors);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl MatchProvider for MockMatchProvider {
    fn find_matches(
        &self,
        _origin: Coordinate,
        _blood_type: BloodType,
    ) -> Result<Vec<MatchedDonor>, MatchProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.result.lock().unwrap().clone()
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

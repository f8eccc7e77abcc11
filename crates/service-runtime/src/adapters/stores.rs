//! # In-Memory Persistence Backends
//!
//! Record stores for the deployable engine. Records cross the storage
//! boundary as serialized JSON, so the serde derives are exercised the
//! same way a database-backed store would exercise them, and reads are
//! honestly fallible.
//!
//! Every store carries failure toggles so integration tests can exercise
//! the write-through and all-or-nothing guarantees of the subsystems
//! above them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use hl_03_donor_registry::DonorStore;
use hl_04_request_lifecycle::{BlobStore, BloodRequest, RequestStore};
use shared_types::{DocumentRef, Donor, DonorId, RequestId, StoreError};

/// Donor record store over a JSON-per-record map.
#[derive(Default)]
pub struct InMemoryDonorStore {
    records: RwLock<HashMap<DonorId, String>>,
    fail_puts: AtomicBool,
    fail_loads: AtomicBool,
}

impl InMemoryDonorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put` fail until cleared.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `load_all` fail until cleared.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }
}

#[async_trait]
impl DonorStore for InMemoryDonorStore {
    async fn put(&self, donor: &Donor) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected donor write failure".into()));
        }
        let json = serde_json::to_string(donor)
            .map_err(|e| StoreError::Backend(format!("donor encode: {e}")))?;
        self.records.write().insert(donor.id, json);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Donor>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected donor read failure".into()));
        }
        self.records
            .read()
            .values()
            .map(|json| {
                serde_json::from_str(json)
                    .map_err(|e| StoreError::Backend(format!("donor decode: {e}")))
            })
            .collect()
    }
}

/// Request record store over a JSON-per-record map.
#[derive(Default)]
pub struct InMemoryRequestStore {
    records: RwLock<HashMap<RequestId, String>>,
    fail_puts: AtomicBool,
    fail_loads: AtomicBool,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put` fail until cleared.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `load_all` fail until cleared.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn put(&self, request: &BloodRequest) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected request write failure".into()));
        }
        let json = serde_json::to_string(request)
            .map_err(|e| StoreError::Backend(format!("request encode: {e}")))?;
        self.records.write().insert(request.id, json);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<BloodRequest>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected request read failure".into()));
        }
        self.records
            .read()
            .values()
            .map(|json| {
                serde_json::from_str(json)
                    .map_err(|e| StoreError::Backend(format!("request decode: {e}")))
            })
            .collect()
    }
}

struct StoredBlob {
    extension: String,
    bytes: Vec<u8>,
}

/// Proof document store. Bytes are kept opaque; the extension is kept
/// alongside them the way a file-backed store would use it to name the
/// file.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<DocumentRef, StoredBlob>>,
    fail_puts: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put` fail until cleared.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.read().len()
    }

    /// Extension recorded at write time, for tests and diagnostics.
    pub fn extension_of(&self, document: DocumentRef) -> Option<String> {
        self.blobs
            .read()
            .get(&document)
            .map(|blob| blob.extension.clone())
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, bytes: &[u8], extension: &str) -> Result<DocumentRef, StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected blob write failure".into()));
        }
        let reference = DocumentRef::generate();
        self.blobs.write().insert(
            reference,
            StoredBlob {
                extension: extension.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        Ok(reference)
    }

    async fn get(&self, document: DocumentRef) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .read()
            .get(&document)
            .map(|blob| blob.bytes.clone())
            .ok_or_else(|| StoreError::NotFound(document.to_string()))
    }
}

//! # Lifecycle Service
//!
//! The main service implementing the Request Lifecycle API.
//!
//! ## Submission path
//!
//! 1. Validate the request fields
//! 2. Validate the proof document against the policy
//! 3. Store the document bytes through the `BlobStore` port
//! 4. Run the donor match through the `MatchProvider` port, exactly once
//! 5. Persist the request with the frozen snapshot through the
//!    `RequestStore` port, then publish it to the in-memory board
//!
//! The stored record is the unit of atomicity: a store failure leaves
//! no request anywhere, so an identical resubmission is safe. The blob
//! written in step 3 may be orphaned by a later failure; orphans carry
//! no request linkage and are reclaimed out of band.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use shared_types::{RequestId, VerifiedIdentity};
use tracing::info;

use crate::domain::{
    validate_document, validate_request, BloodRequest, DocumentPolicy, LifecycleError,
    MatchSnapshot, NewRequest, ProofDocument, RequestStatus, SubmissionReceipt,
};
use crate::ports::inbound::LifecycleApi;
use crate::ports::outbound::{BlobStore, Clock, MatchProvider, RequestStore};

/// The Request Lifecycle service.
pub struct LifecycleService {
    board: DashMap<RequestId, BloodRequest>,
    blob_store: Arc<dyn BlobStore>,
    request_store: Arc<dyn RequestStore>,
    matcher: Arc<dyn MatchProvider>,
    clock: Arc<dyn Clock>,
    policy: DocumentPolicy,
}

impl LifecycleService {
    /// Builds a service over the given ports. The board starts empty;
    /// call [`LifecycleApi::rebuild_board`] to replay the durable store
    /// before taking traffic.
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        request_store: Arc<dyn RequestStore>,
        matcher: Arc<dyn MatchProvider>,
        clock: Arc<dyn Clock>,
        policy: DocumentPolicy,
    ) -> Self {
        Self {
            board: DashMap::new(),
            blob_store,
            request_store,
            matcher,
            clock,
            policy,
        }
    }

    /// Number of requests on the board.
    pub fn request_count(&self) -> usize {
        self.board.len()
    }

    /// The document policy the service enforces.
    pub fn policy(&self) -> &DocumentPolicy {
        &self.policy
    }
}

#[async_trait]
impl LifecycleApi for LifecycleService {
    async fn submit(
        &self,
        identity: &VerifiedIdentity,
        request: NewRequest,
        document: ProofDocument,
    ) -> Result<SubmissionReceipt, LifecycleError> {
        validate_request(&request)?;
        let extension = validate_document(&document, &self.policy)?;

        let document_ref = self
            .blob_store
            .put(&document.bytes, &extension)
            .await
            .map_err(|e| LifecycleError::Storage(e.to_string()))?;

        let donors = self
            .matcher
            .find_matches(request.origin, request.blood_type)
            .map_err(|e| LifecycleError::Matching(e.0))?;

        let now = self.clock.now();
        let record = BloodRequest {
            id: RequestId::generate(),
            patient_name: request.patient_name,
            hospital_name: request.hospital_name,
            blood_type: request.blood_type,
            units_needed: request.units_needed,
            urgency: request.urgency,
            origin: request.origin,
            contact: request.contact,
            additional_info: request.additional_info,
            document: document_ref,
            status: RequestStatus::Pending,
            created_at: now,
            snapshot: MatchSnapshot {
                donors,
                computed_at: now,
            },
        };

        // All-or-nothing: the board never shows a request the store did
        // not accept.
        self.request_store
            .put(&record)
            .await
            .map_err(|e| LifecycleError::Storage(e.to_string()))?;
        self.board.insert(record.id, record.clone());

        info!(
            request_id = %record.id,
            actor = %identity.subject,
            urgency = %record.urgency,
            matches = record.snapshot.donors.len(),
            "blood request accepted"
        );
        Ok(SubmissionReceipt {
            request_id: record.id,
            snapshot: record.snapshot,
        })
    }

    fn get(&self, request_id: RequestId) -> Option<BloodRequest> {
        self.board.get(&request_id).map(|r| r.value().clone())
    }

    fn list(&self) -> Vec<BloodRequest> {
        let mut requests: Vec<BloodRequest> =
            self.board.iter().map(|r| r.value().clone()).collect();
        requests.sort_unstable_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        requests
    }

    async fn rebuild_board(&self) -> Result<usize, LifecycleError> {
        let records = self
            .request_store
            .load_all()
            .await
            .map_err(|e| LifecycleError::Storage(e.to_string()))?;

        let loaded = records.len();
        for request in records {
            self.board.insert(request.id, request);
        }
        info!(requests = loaded, "request board rebuilt");
        Ok(loaded)
    }
}

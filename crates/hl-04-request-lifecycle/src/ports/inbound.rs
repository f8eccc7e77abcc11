//! # Inbound Port - LifecycleApi
//!
//! Primary driving port exposing request submission and the board. The
//! public request surface drives `submit`; the board views drive `get`
//! and `list`; the runtime drives `rebuild_board` once at startup.

use async_trait::async_trait;
use shared_types::{RequestId, VerifiedIdentity};

use crate::domain::{BloodRequest, LifecycleError, NewRequest, ProofDocument, SubmissionReceipt};

/// Primary API for the Request Lifecycle subsystem.
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    /// Accepts a request: validates it and its proof document, stores
    /// the document, runs the donor match exactly once, and persists
    /// the request with the match result frozen inside.
    ///
    /// # Errors
    /// - `Validation`: a request field or the document violates policy
    /// - `Matching`: the match could not run; nothing was stored
    /// - `Storage`: the durable write failed; nothing partial remains
    ///   and an identical resubmission is safe
    async fn submit(
        &self,
        identity: &VerifiedIdentity,
        request: NewRequest,
        document: ProofDocument,
    ) -> Result<SubmissionReceipt, LifecycleError>;

    /// Single request lookup, with its frozen snapshot.
    fn get(&self, request_id: RequestId) -> Option<BloodRequest>;

    /// The request board: every request, newest first.
    fn list(&self) -> Vec<BloodRequest>;

    /// Replays the durable store into the in-memory board. Runs once at
    /// startup. Returns the number of requests loaded.
    async fn rebuild_board(&self) -> Result<usize, LifecycleError>;
}

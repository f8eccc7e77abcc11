//! Request entities and the frozen match snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{
    BloodType, ContactInfo, Coordinate, DocumentRef, MatchedDonor, RequestId, UrgencyTier,
};

/// A request submission, before the lifecycle has assigned an id, run
/// the match, or stored the proof document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRequest {
    pub patient_name: String,
    pub hospital_name: String,
    pub blood_type: BloodType,
    /// Whole units of blood needed; at least 1.
    pub units_needed: u32,
    pub urgency: UrgencyTier,
    /// Where the blood is needed; the center of the donor search.
    pub origin: Coordinate,
    pub contact: ContactInfo,
    pub additional_info: Option<String>,
}

/// An uploaded proof document: filename plus opaque bytes.
///
/// The engine validates metadata only (extension, size); it never
/// inspects the content.
#[derive(Debug, Clone)]
pub struct ProofDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Where a request sits in its lifecycle.
///
/// The engine only ever assigns `Pending`; later transitions belong to
/// the coordination workflow that consumes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
    Cancelled,
}

/// The match result frozen into a request at submission time.
///
/// Distances keep full `f64` precision; donor records inside the rows
/// are copies taken at `computed_at` and never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Matched donors, ordered by (distance asc, donor id asc).
    pub donors: Vec<MatchedDonor>,
    /// When the match ran.
    pub computed_at: DateTime<Utc>,
}

impl MatchSnapshot {
    /// True when the match found nobody in range.
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}

/// A stored blood request with its frozen snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: RequestId,
    pub patient_name: String,
    pub hospital_name: String,
    pub blood_type: BloodType,
    pub units_needed: u32,
    pub urgency: UrgencyTier,
    pub origin: Coordinate,
    pub contact: ContactInfo,
    pub additional_info: Option<String>,
    /// Handle to the stored proof document.
    pub document: DocumentRef,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    /// Match result at submission time. Never recomputed.
    pub snapshot: MatchSnapshot,
}

/// What a successful submission hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub request_id: RequestId,
    /// The same snapshot the stored request carries.
    pub snapshot: MatchSnapshot,
}

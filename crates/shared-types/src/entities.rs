//! # Core Domain Entities
//!
//! Defines the entities exchanged between HemoLink subsystems.
//!
//! ## Clusters
//!
//! - **Identifiers**: `DonorId`, `RequestId`, `DocumentRef`
//! - **Donors**: `Donor`, `EligibilitySnapshot`, `DonorStatus`, `ContactInfo`
//! - **Matching**: `MatchedDonor`, `UrgencyTier`

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blood::BloodType;
use crate::geo::Coordinate;

// =============================================================================
// CLUSTER A: IDENTIFIERS
// =============================================================================

/// Unique identifier for a registered donor.
///
/// Ordered so that result ties can be broken deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DonorId(pub Uuid);

impl DonorId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        DonorId(Uuid::new_v4())
    }
}

impl std::fmt::Display for DonorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a blood request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        RequestId(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle to a stored proof document blob.
///
/// Issued by the blob store on write; the engine never interprets it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DocumentRef(pub Uuid);

impl DocumentRef {
    /// Generates a fresh random handle.
    pub fn generate() -> Self {
        DocumentRef(Uuid::new_v4())
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// CLUSTER B: DONORS
// =============================================================================

/// How to reach a donor or requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// E-mail address. Unique across active donors.
    pub email: String,
    /// Phone number in whatever format the donor supplied.
    pub phone: String,
}

/// Self-reported eligibility data captured at registration or update time.
///
/// The engine stores this verbatim for downstream screening; it does not
/// gate matching on it beyond registration validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySnapshot {
    /// Age in years. Accepted range at registration is 18..=65.
    pub age: u8,
    /// Body weight in kilograms. Minimum accepted is 50.
    pub weight_kg: f64,
    /// Date of the donor's most recent donation, if any.
    pub last_donation: Option<NaiveDate>,
    /// Free-form medical conditions the donor disclosed.
    pub medical_conditions: Vec<String>,
}

/// Lifecycle state of a donor record.
///
/// Donors are never hard-deleted; deactivation removes them from search
/// while the record itself survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorStatus {
    /// Visible to matching.
    Active,
    /// Retained but excluded from every search surface.
    Deactivated,
}

impl DonorStatus {
    /// True when the donor participates in matching.
    pub fn is_active(self) -> bool {
        matches!(self, DonorStatus::Active)
    }
}

/// A registered donor. The registry is the source of truth for this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    /// Stable identifier, assigned at registration.
    pub id: DonorId,
    /// Full name as supplied.
    pub name: String,
    /// Contact channels.
    pub contact: ContactInfo,
    /// ABO/Rh blood type.
    pub blood_type: BloodType,
    /// Last known position, in WGS84 decimal degrees.
    pub location: Coordinate,
    /// Free-form postal address.
    pub address: String,
    /// Eligibility data captured with the record.
    pub eligibility: EligibilitySnapshot,
    /// Active or deactivated.
    pub status: DonorStatus,
    /// When the donor first registered.
    pub registered_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl Donor {
    /// True when the donor participates in matching.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

// =============================================================================
// CLUSTER C: MATCHING
// =============================================================================

/// Urgency tier attached to a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Normal,
    Urgent,
    Critical,
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UrgencyTier::Normal => "normal",
            UrgencyTier::Urgent => "urgent",
            UrgencyTier::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// One row of a match result: a donor plus the distance at which they were
/// found.
///
/// Snapshots of these rows are frozen into requests at submission time and
/// never recomputed afterwards. The stored distance keeps full `f64`
/// precision; rounding happens only at presentation via
/// [`rounded_distance_km`](Self::rounded_distance_km).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedDonor {
    /// The matched donor.
    pub donor_id: DonorId,
    /// Donor name, copied for display at snapshot time.
    pub name: String,
    /// Donor blood type at match time.
    pub blood_type: BloodType,
    /// Great-circle distance from the request origin, in km, full
    /// precision.
    pub distance_km: f64,
    /// Contact channels at match time.
    pub contact: ContactInfo,
}

impl MatchedDonor {
    /// Distance rounded to two decimals, the form shown on every
    /// user-facing surface.
    pub fn rounded_distance_km(&self) -> f64 {
        (self.distance_km * 100.0).round() / 100.0
    }
}

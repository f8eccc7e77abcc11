//! Registry input types and configuration.

use serde::{Deserialize, Serialize};
use shared_types::{BloodType, ContactInfo, Coordinate, DonorId, EligibilitySnapshot};

/// A registration submission, before the registry has assigned an id or
/// a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonor {
    pub name: String,
    pub contact: ContactInfo,
    pub blood_type: BloodType,
    pub location: Coordinate,
    /// Display-only postal address; never parsed or geocoded.
    pub address: String,
    pub eligibility: EligibilitySnapshot,
}

/// A partial profile edit. Unset fields keep their current value.
///
/// Email is deliberately absent: it is the donor's external identity
/// anchor and never changes after registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    pub eligibility: Option<EligibilitySnapshot>,
}

impl ProfileUpdate {
    /// True when the edit carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.blood_type.is_none()
            && self.eligibility.is_none()
    }
}

/// One donor's searchable footprint, as handed to the location
/// projection during a startup rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEntry {
    pub donor_id: DonorId,
    pub location: Coordinate,
    pub blood_type: BloodType,
}

/// Registration acceptance thresholds.
///
/// These mirror the intake rules of the donation programme; they gate
/// admission only. Records admitted under older thresholds are never
/// re-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryConfig {
    /// Minimum donor age in years, inclusive.
    pub min_age: u8,
    /// Maximum donor age in years, inclusive.
    pub max_age: u8,
    /// Minimum donor weight in kilograms.
    pub min_weight_kg: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            min_age: 18,
            max_age: 65,
            min_weight_kg: 50.0,
        }
    }
}

impl RegistryConfig {
    /// Production thresholds; tests use the same values unless a case
    /// needs to probe a boundary.
    pub fn for_testing() -> Self {
        Self::default()
    }
}

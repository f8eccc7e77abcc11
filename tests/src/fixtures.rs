//! Shared builders for integration tests and benchmarks.
//!
//! Every helper returns plain domain values; nothing here touches global
//! state, so tests that use them can run in parallel.

use chrono::NaiveDate;

use hl_03_donor_registry::NewDonor;
use hl_04_request_lifecycle::{NewRequest, ProofDocument};
use service_runtime::container::{EngineContainer, ServiceConfig};
use shared_types::{
    BloodType, ContactInfo, Coordinate, EligibilitySnapshot, UrgencyTier, VerifiedIdentity,
};

/// Operator identity used for every authenticated call in the suite.
pub fn operator() -> VerifiedIdentity {
    VerifiedIdentity::new("itest-operator", "operator@hemolink.test")
}

/// Coordinate that is known-valid at construction time.
pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("fixture coordinate is in range")
}

/// Fully wired engine with default configuration.
pub fn engine() -> EngineContainer {
    EngineContainer::new(ServiceConfig::default()).expect("default config is valid")
}

/// Fully wired engine with a caller-tweaked configuration.
pub fn engine_with(config: ServiceConfig) -> EngineContainer {
    EngineContainer::new(config).expect("fixture config is valid")
}

/// Eligible adult profile: age 30, 70 kg, one past donation.
pub fn eligibility() -> EligibilitySnapshot {
    EligibilitySnapshot {
        age: 30,
        weight_kg: 70.0,
        last_donation: NaiveDate::from_ymd_opt(2024, 11, 2),
        medical_conditions: vec![],
    }
}

/// Donor submission at an explicit position.
pub fn donor_at(email: &str, blood_type: BloodType, lat: f64, lng: f64) -> NewDonor {
    NewDonor {
        name: format!("Donor <{email}>"),
        contact: ContactInfo {
            email: email.to_string(),
            phone: "+1-555-0100".to_string(),
        },
        blood_type,
        location: coord(lat, lng),
        address: "42 Fixture Avenue".to_string(),
        eligibility: eligibility(),
    }
}

/// Request submission centered on an explicit origin.
pub fn request_at(blood_type: BloodType, lat: f64, lng: f64) -> NewRequest {
    NewRequest {
        patient_name: "Pat Doe".to_string(),
        hospital_name: "General Hospital".to_string(),
        blood_type,
        units_needed: 2,
        urgency: UrgencyTier::Urgent,
        origin: coord(lat, lng),
        contact: ContactInfo {
            email: "ward-7@hospital.test".to_string(),
            phone: "+1-555-0199".to_string(),
        },
        additional_info: None,
    }
}

/// PDF proof document of exactly `len` bytes.
pub fn pdf_document(len: usize) -> ProofDocument {
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(len, 0);
    ProofDocument {
        filename: "discharge-summary.pdf".to_string(),
        bytes,
    }
}

//! Compatibility policies.
//!
//! Which donor types satisfy a request is a medical policy question, not
//! an engine question, so it enters the engine as an injected capability.
//! The shipped policies:
//!
//! - [`ExactMatch`]: donor type must equal the requested type. This is
//!   the configured default.
//! - [`MedicallyCompatible`]: the standard ABO/Rh transfusion matrix
//!   (O- universal donor, AB+ universal recipient).

use shared_types::{BloodType, BloodTypeSet};

/// Decides which donor blood types may serve a requested type.
pub trait CompatibilityPolicy: Send + Sync {
    /// The set of donor types a recipient of `requested` may receive from.
    /// Always contains `requested` itself.
    fn eligible_donor_types(&self, requested: BloodType) -> BloodTypeSet;

    /// Short policy name for logs and configuration echo.
    fn name(&self) -> &'static str;
}

/// Donor type must equal the requested type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl CompatibilityPolicy for ExactMatch {
    fn eligible_donor_types(&self, requested: BloodType) -> BloodTypeSet {
        BloodTypeSet::only(requested)
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Standard ABO/Rh red-cell transfusion matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedicallyCompatible;

impl CompatibilityPolicy for MedicallyCompatible {
    fn eligible_donor_types(&self, requested: BloodType) -> BloodTypeSet {
        compatible_donor_types(requested)
    }

    fn name(&self) -> &'static str {
        "medical"
    }
}

/// The ABO/Rh matrix: donors whose red cells a recipient of `recipient`
/// type can accept.
pub fn compatible_donor_types(recipient: BloodType) -> BloodTypeSet {
    use BloodType::*;
    match recipient {
        APos => BloodTypeSet::of(&[APos, ANeg, OPos, ONeg]),
        ANeg => BloodTypeSet::of(&[ANeg, ONeg]),
        BPos => BloodTypeSet::of(&[BPos, BNeg, OPos, ONeg]),
        BNeg => BloodTypeSet::of(&[BNeg, ONeg]),
        AbPos => BloodTypeSet::ALL,
        AbNeg => BloodTypeSet::of(&[ANeg, BNeg, AbNeg, ONeg]),
        OPos => BloodTypeSet::of(&[OPos, ONeg]),
        ONeg => BloodTypeSet::only(ONeg),
    }
}

/// Which shipped policy to use. Selected by configuration; the engine
/// itself only ever sees the trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatibilityMode {
    #[default]
    Exact,
    Medical,
}

impl CompatibilityMode {
    /// Instantiates the selected policy.
    pub fn policy(self) -> Box<dyn CompatibilityPolicy> {
        match self {
            CompatibilityMode::Exact => Box::new(ExactMatch),
            CompatibilityMode::Medical => Box::new(MedicallyCompatible),
        }
    }
}

impl std::str::FromStr for CompatibilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(CompatibilityMode::Exact),
            "medical" => Ok(CompatibilityMode::Medical),
            other => Err(format!("unknown compatibility mode: {other:?}")),
        }
    }
}

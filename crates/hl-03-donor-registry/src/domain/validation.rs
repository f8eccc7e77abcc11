//! Field constraints for registration and profile edits.
//!
//! Validation runs once, at the write that introduces the data. The
//! eligibility snapshot in particular is checked at registration and
//! then carried verbatim; the registry never re-judges an admitted
//! donor against newer thresholds.

use shared_types::EligibilitySnapshot;

use super::entities::{NewDonor, ProfileUpdate, RegistryConfig};
use super::errors::RegistryError;

/// Canonical form of an email for uniqueness checks: trimmed and
/// lowercased. The stored record keeps the donor's original spelling.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Cheap plausibility check: one `@`, non-empty local part, and a
/// domain containing a dot. Deliverability is not the registry's
/// problem.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validates a registration submission against the acceptance
/// thresholds.
pub fn validate_new_donor(donor: &NewDonor, config: &RegistryConfig) -> Result<(), RegistryError> {
    validate_name(&donor.name)?;
    validate_phone(&donor.contact.phone)?;
    if !is_plausible_email(&donor.contact.email) {
        return Err(RegistryError::invalid(
            "email",
            format!("not a plausible address: {:?}", donor.contact.email.trim()),
        ));
    }
    if donor.address.trim().is_empty() {
        return Err(RegistryError::invalid("address", "must not be empty"));
    }
    validate_eligibility(&donor.eligibility, config)
}

/// Validates the fields a profile edit actually carries.
pub fn validate_update(update: &ProfileUpdate, config: &RegistryConfig) -> Result<(), RegistryError> {
    if update.is_empty() {
        return Err(RegistryError::invalid("update", "carries no field"));
    }
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(phone) = &update.phone {
        validate_phone(phone)?;
    }
    if let Some(address) = &update.address {
        if address.trim().is_empty() {
            return Err(RegistryError::invalid("address", "must not be empty"));
        }
    }
    if let Some(eligibility) = &update.eligibility {
        validate_eligibility(eligibility, config)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        return Err(RegistryError::invalid("name", "must not be empty"));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), RegistryError> {
    if phone.trim().is_empty() {
        return Err(RegistryError::invalid("phone", "must not be empty"));
    }
    Ok(())
}

fn validate_eligibility(
    eligibility: &EligibilitySnapshot,
    config: &RegistryConfig,
) -> Result<(), RegistryError> {
    if eligibility.age < config.min_age || eligibility.age > config.max_age {
        return Err(RegistryError::invalid(
            "age",
            format!(
                "must be between {} and {}, got {}",
                config.min_age, config.max_age, eligibility.age
            ),
        ));
    }
    if !eligibility.weight_kg.is_finite() || eligibility.weight_kg < config.min_weight_kg {
        return Err(RegistryError::invalid(
            "weight_kg",
            format!(
                "must be at least {}, got {}",
                config.min_weight_kg, eligibility.weight_kg
            ),
        ));
    }
    Ok(())
}

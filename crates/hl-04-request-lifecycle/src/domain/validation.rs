//! Field constraints for request submissions.

use super::entities::NewRequest;
use super::errors::LifecycleError;

/// Validates a submission's own fields. The proof document has its own
/// check in [`documents`](super::documents).
pub fn validate_request(request: &NewRequest) -> Result<(), LifecycleError> {
    if request.patient_name.trim().is_empty() {
        return Err(LifecycleError::invalid("patient_name", "must not be empty"));
    }
    if request.hospital_name.trim().is_empty() {
        return Err(LifecycleError::invalid("hospital_name", "must not be empty"));
    }
    if request.units_needed < 1 {
        return Err(LifecycleError::invalid("units_needed", "must be at least 1"));
    }
    if request.contact.phone.trim().is_empty() {
        return Err(LifecycleError::invalid("phone", "must not be empty"));
    }
    Ok(())
}

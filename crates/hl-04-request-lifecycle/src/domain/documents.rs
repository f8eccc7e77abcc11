//! Proof document policy.
//!
//! Every request arrives with a hospital or physician document backing
//! it. The engine checks shape, not substance: the extension must sit
//! on the allow-list and the payload must fit the size cap. Content
//! review is a human step downstream.

use super::entities::ProofDocument;
use super::errors::LifecycleError;

/// File extensions accepted for proof documents, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "jpg", "jpeg", "png", "doc", "docx"];

/// Default payload cap: 5 MB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Acceptance policy for uploaded proof documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPolicy {
    /// Largest accepted payload, in bytes. Inclusive.
    pub max_bytes: usize,
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        DocumentPolicy {
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl DocumentPolicy {
    /// Tiny cap so tests exercise the size check without megabyte
    /// fixtures.
    pub fn for_testing() -> Self {
        DocumentPolicy { max_bytes: 1024 }
    }
}

/// Validates document metadata against the policy and returns the
/// normalized (lowercase) extension.
///
/// Checks run in the order a caller can fix them: extension first,
/// size second.
pub fn validate_document(
    document: &ProofDocument,
    policy: &DocumentPolicy,
) -> Result<String, LifecycleError> {
    let extension = match document.filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => {
            return Err(LifecycleError::invalid(
                "document",
                format!("filename {:?} has no extension", document.filename),
            ));
        }
    };
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(LifecycleError::invalid(
            "document",
            format!(
                "extension {extension:?} not allowed; accepted: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ),
        ));
    }
    if document.bytes.len() > policy.max_bytes {
        return Err(LifecycleError::invalid(
            "document",
            format!(
                "{} bytes exceeds the {} byte cap",
                document.bytes.len(),
                policy.max_bytes
            ),
        ));
    }
    Ok(extension)
}

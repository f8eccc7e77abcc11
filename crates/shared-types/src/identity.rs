//! # Verified Caller Identity
//!
//! The engine does not authenticate anyone. Callers arrive with an identity
//! already verified by the upstream boundary (session service, gateway),
//! and subsystems treat that assertion as fact.

use serde::{Deserialize, Serialize};

/// An identity assertion produced by the upstream authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Stable subject identifier from the identity provider.
    pub subject: String,
    /// Verified e-mail address of the caller.
    pub email: String,
}

impl VerifiedIdentity {
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        VerifiedIdentity {
            subject: subject.into(),
            email: email.into(),
        }
    }
}

//! # Matching Service
//!
//! The main service implementing the Matching Engine API.
//!
//! ## Pipeline
//!
//! 1. Validate the query (radius, result cap)
//! 2. Resolve the eligible donor-type set via the injected policy
//! 3. Discover candidates through the locator port (one call, one filter)
//! 4. Dedupe by donor id, keeping the nearest observation
//! 5. Hydrate through the directory port; drop donors the registry no
//!    longer vouches for (self-healing, logged)
//! 6. Sort by (distance asc, donor id asc), truncate to the result cap
//!
//! The whole pipeline is a read: nothing in the registry or the index is
//! mutated by a query.

use std::sync::Arc;

use shared_types::{Deadline, MatchedDonor};
use tracing::{debug, warn};

use crate::domain::{
    dedupe_nearest, rank, Candidate, CompatibilityPolicy, MatchError, MatchQuery, MatchingConfig,
    NearbyQuery,
};
use crate::ports::inbound::MatchingApi;
use crate::ports::outbound::{DonorDirectory, DonorLocator, LocateError};

/// The Matching Engine service.
///
/// Generic over nothing: the compatibility policy and both outbound
/// dependencies are injected as trait objects, so swapping the policy or
/// the discovery backend never touches this code.
pub struct MatchingService {
    locator: Arc<dyn DonorLocator>,
    directory: Arc<dyn DonorDirectory>,
    policy: Box<dyn CompatibilityPolicy>,
    config: MatchingConfig,
}

impl MatchingService {
    /// Builds a service over the given ports and policy.
    pub fn new(
        locator: Arc<dyn DonorLocator>,
        directory: Arc<dyn DonorDirectory>,
        policy: Box<dyn CompatibilityPolicy>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            locator,
            directory,
            policy,
            config,
        }
    }

    /// Name of the active compatibility policy, for logs and diagnostics.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// The configuration the service was built with.
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    fn validate_radius(&self, radius_km: f64) -> Result<(), MatchError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(MatchError::invalid(
                "radius_km",
                format!("must be positive and finite, got {radius_km}"),
            ));
        }
        if radius_km > self.config.max_radius_km {
            return Err(MatchError::invalid(
                "radius_km",
                format!("{radius_km} exceeds maximum {}", self.config.max_radius_km),
            ));
        }
        Ok(())
    }

    fn validate_cap(&self, max_results: Option<usize>) -> Result<(), MatchError> {
        if max_results == Some(0) {
            return Err(MatchError::invalid(
                "max_results",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Deadline for one query: the caller's timeout wins, then the
    /// configured default, then unbounded.
    fn deadline_for(&self, timeout: Option<std::time::Duration>) -> Deadline {
        match timeout.or(self.config.default_timeout) {
            Some(budget) => Deadline::after(budget),
            None => Deadline::NONE,
        }
    }

    /// Shared tail of both query paths: dedupe, hydrate, rank, truncate.
    fn assemble(
        &self,
        candidates: Vec<Candidate>,
        max_results: Option<usize>,
    ) -> Vec<MatchedDonor> {
        let unique = dedupe_nearest(candidates);
        let ids: Vec<_> = unique.iter().map(|c| c.donor_id).collect();
        let records = self.directory.hydrate(&ids);

        let mut rows = Vec::with_capacity(unique.len());
        for (candidate, record) in unique.into_iter().zip(records) {
            match record {
                Some(donor) => rows.push(MatchedDonor {
                    donor_id: donor.id,
                    name: donor.name,
                    // The registry record is authoritative; the index
                    // projection may lag a profile edit.
                    blood_type: donor.blood_type,
                    distance_km: candidate.distance_km,
                    contact: donor.contact,
                }),
                None => {
                    // Indexed but unknown to (or deactivated in) the
                    // registry. Heal by dropping, never by failing.
                    warn!(
                        donor_id = %candidate.donor_id,
                        "dropping orphaned index candidate"
                    );
                }
            }
        }

        rank(&mut rows);
        if let Some(cap) = max_results {
            rows.truncate(cap);
        }
        rows
    }
}

impl MatchingApi for MatchingService {
    fn match_donors(&self, query: MatchQuery) -> Result<Vec<MatchedDonor>, MatchError> {
        self.validate_radius(query.radius_km)?;
        self.validate_cap(query.max_results)?;

        let filter = self.policy.eligible_donor_types(query.blood_type);
        let deadline = self.deadline_for(query.timeout);

        let candidates = self
            .locator
            .find_within(query.origin, query.radius_km, filter, deadline)
            .map_err(|e| match e {
                LocateError::DeadlineExceeded => MatchError::Timeout,
                LocateError::Internal(msg) => MatchError::Internal(msg),
            })?;

        let rows = self.assemble(candidates, query.max_results);
        debug!(
            blood_type = %query.blood_type,
            radius_km = query.radius_km,
            policy = self.policy.name(),
            matches = rows.len(),
            "match query complete"
        );
        Ok(rows)
    }

    fn nearby_donors(&self, query: NearbyQuery) -> Result<Vec<MatchedDonor>, MatchError> {
        let radius_km = query.radius_km.unwrap_or(self.config.default_radius_km);
        self.validate_radius(radius_km)?;
        self.validate_cap(query.max_results)?;

        let deadline = self.deadline_for(query.timeout);
        let candidates = self
            .locator
            .find_within(
                query.origin,
                radius_km,
                shared_types::BloodTypeSet::ALL,
                deadline,
            )
            .map_err(|e| match e {
                LocateError::DeadlineExceeded => MatchError::Timeout,
                LocateError::Internal(msg) => MatchError::Internal(msg),
            })?;

        let rows = self.assemble(candidates, query.max_results);
        debug!(
            radius_km,
            donors = rows.len(),
            "nearby-donor query complete"
        );
        Ok(rows)
    }
}

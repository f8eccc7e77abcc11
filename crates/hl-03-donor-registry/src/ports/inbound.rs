//! # Inbound Port - RegistryApi
//!
//! Primary driving port exposing donor lifecycle management. The public
//! registration surface drives the mutating operations; the matching
//! engine reads through `hydrate`; the runtime drives
//! `rebuild_projection` once at startup.

use async_trait::async_trait;
use shared_types::{Coordinate, Donor, DonorId, VerifiedIdentity};

use crate::domain::{NewDonor, ProfileUpdate, RegistryError};

/// Primary API for the Donor Registry subsystem.
///
/// Mutating operations are async because they write through the durable
/// store before taking effect. Reads serve straight from the in-memory
/// working set and stay synchronous.
///
/// Every mutation takes a [`VerifiedIdentity`]: the caller assertion an
/// outer authentication layer has already verified. The registry logs
/// it for the audit trail and never inspects credentials itself.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Registers a donor and projects their location into the index.
    ///
    /// # Errors
    /// - `Validation`: a field violates the acceptance constraints
    /// - `DuplicateEmail`: the email is already claimed
    /// - `Storage`: the durable write failed; nothing was applied
    async fn register(
        &self,
        identity: &VerifiedIdentity,
        new_donor: NewDonor,
    ) -> Result<DonorId, RegistryError>;

    /// Moves a donor. The new coordinate is persisted, then projected;
    /// a concurrent proximity query sees the old position or the new
    /// one, never neither.
    async fn update_coordinate(
        &self,
        identity: &VerifiedIdentity,
        donor_id: DonorId,
        location: Coordinate,
    ) -> Result<(), RegistryError>;

    /// Applies a partial profile edit. A blood-type change re-projects
    /// the donor so future matches see the new type.
    async fn update_profile(
        &self,
        identity: &VerifiedIdentity,
        donor_id: DonorId,
        update: ProfileUpdate,
    ) -> Result<(), RegistryError>;

    /// Deactivates a donor: they vanish from hydration and from future
    /// match results, while the record itself survives so historic
    /// match snapshots keep resolving. Terminal and idempotent.
    async fn deactivate(
        &self,
        identity: &VerifiedIdentity,
        donor_id: DonorId,
    ) -> Result<(), RegistryError>;

    /// Full record lookup, regardless of status.
    fn get(&self, donor_id: DonorId) -> Option<Donor>;

    /// Batch lookup for match hydration. Position `i` answers `ids[i]`;
    /// unknown and deactivated donors come back `None`.
    fn hydrate(&self, ids: &[DonorId]) -> Vec<Option<Donor>>;

    /// Every active donor, sorted by id.
    fn active_donors(&self) -> Vec<Donor>;

    /// Replays the durable store into the working set and the location
    /// projection. Runs once at startup, before the service takes
    /// traffic. Returns the number of donors projected.
    async fn rebuild_projection(&self) -> Result<usize, RegistryError>;
}

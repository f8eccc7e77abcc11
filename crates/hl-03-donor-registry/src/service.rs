//! # Registry Service
//!
//! The main service implementing the Donor Registry API.
//!
//! ## Write path
//!
//! Every mutation follows the same order:
//!
//! 1. Validate the input
//! 2. Persist the new record version through the `DonorStore` port
//! 3. Only then apply it to the in-memory working set and the location
//!    projection
//!
//! A store failure therefore leaves the registry exactly as it was:
//! no working-set entry, no claimed email, no projected location. The
//! caller can retry the identical call.
//!
//! ## Concurrency
//!
//! Reads serve lock-free from the `DashMap` working set. Concurrent
//! edits of the same donor are last-writer-wins; the apply-and-project
//! step runs under the donor's map entry guard so the projection can
//! never end up describing a record version the working set does not
//! hold.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::{Coordinate, Donor, DonorId, DonorStatus, VerifiedIdentity};
use tracing::{debug, info};

use crate::domain::{
    normalize_email, validate_new_donor, validate_update, NewDonor, ProfileUpdate,
    ProjectionEntry, RegistryConfig, RegistryError,
};
use crate::ports::inbound::RegistryApi;
use crate::ports::outbound::{Clock, DonorStore, LocationProjection};

/// What a successful write means for the location projection.
enum ProjectionEffect {
    /// Project the record's coordinate and blood type.
    Upsert,
    /// Drop the donor from the projection.
    Remove,
    /// The edit is invisible to proximity search; leave the projection
    /// alone.
    Keep,
}

/// The Donor Registry service.
pub struct RegistryService {
    donors: DashMap<DonorId, Donor>,
    /// Normalized email -> owning donor. Entries are reserved before
    /// the durable write and rolled back if it fails; they are never
    /// released otherwise, so an address stays claimed for the life of
    /// the record, deactivated or not.
    email_index: DashMap<String, DonorId>,
    store: Arc<dyn DonorStore>,
    projection: Arc<dyn LocationProjection>,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl RegistryService {
    /// Builds a service over the given ports. The working set starts
    /// empty; call [`RegistryApi::rebuild_projection`] to replay the
    /// durable store before taking traffic.
    pub fn new(
        store: Arc<dyn DonorStore>,
        projection: Arc<dyn LocationProjection>,
        clock: Arc<dyn Clock>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            donors: DashMap::new(),
            email_index: DashMap::new(),
            store,
            projection,
            clock,
            config,
        }
    }

    /// Number of records in the working set, any status.
    pub fn donor_count(&self) -> usize {
        self.donors.len()
    }

    /// Current record clone, refusing ids that cannot be edited.
    fn current_for_edit(&self, donor_id: DonorId) -> Result<Donor, RegistryError> {
        let record = self
            .donors
            .get(&donor_id)
            .map(|r| r.value().clone())
            .ok_or(RegistryError::NotFound { donor_id })?;
        if record.status != DonorStatus::Active {
            return Err(RegistryError::Deactivated { donor_id });
        }
        Ok(record)
    }

    async fn persist(&self, donor: &Donor) -> Result<(), RegistryError> {
        self.store
            .put(donor)
            .await
            .map_err(|e| RegistryError::Storage(e.to_string()))
    }

    /// Installs a persisted record version and applies its projection
    /// effect while holding the donor's entry guard.
    fn apply(&self, donor: Donor, effect: ProjectionEffect) {
        let donor_id = donor.id;
        let location = donor.location;
        let blood_type = donor.blood_type;
        let _guard = match self.donors.entry(donor_id) {
            Entry::Occupied(mut slot) => {
                slot.insert(donor);
                slot.into_ref()
            }
            Entry::Vacant(slot) => slot.insert(donor),
        };
        match effect {
            ProjectionEffect::Upsert => self.projection.upsert(donor_id, location, blood_type),
            ProjectionEffect::Remove => self.projection.remove(donor_id),
            ProjectionEffect::Keep => {}
        }
    }
}

#[async_trait]
impl RegistryApi for RegistryService {
    async fn register(
        &self,
        identity: &VerifiedIdentity,
        new_donor: NewDonor,
    ) -> Result<DonorId, RegistryError> {
        validate_new_donor(&new_donor, &self.config)?;

        let donor_id = DonorId::generate();
        let email_key = normalize_email(&new_donor.contact.email);

        // Reserve the email before the durable write so two concurrent
        // registrations cannot both pass the uniqueness check. The
        // guard must not be held across the await below.
        match self.email_index.entry(email_key.clone()) {
            Entry::Occupied(_) => {
                return Err(RegistryError::DuplicateEmail {
                    email: new_donor.contact.email,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(donor_id);
            }
        }

        let now = self.clock.now();
        let donor = Donor {
            id: donor_id,
            name: new_donor.name,
            contact: new_donor.contact,
            blood_type: new_donor.blood_type,
            location: new_donor.location,
            address: new_donor.address,
            eligibility: new_donor.eligibility,
            status: DonorStatus::Active,
            registered_at: now,
            updated_at: now,
        };

        if let Err(err) = self.persist(&donor).await {
            self.email_index.remove(&email_key);
            return Err(err);
        }

        self.apply(donor, ProjectionEffect::Upsert);
        info!(
            donor_id = %donor_id,
            actor = %identity.subject,
            "donor registered"
        );
        Ok(donor_id)
    }

    async fn update_coordinate(
        &self,
        identity: &VerifiedIdentity,
        donor_id: DonorId,
        location: Coordinate,
    ) -> Result<(), RegistryError> {
        let mut updated = self.current_for_edit(donor_id)?;
        updated.location = location;
        updated.updated_at = self.clock.now();

        self.persist(&updated).await?;
        self.apply(updated, ProjectionEffect::Upsert);
        debug!(
            donor_id = %donor_id,
            actor = %identity.subject,
            "donor coordinate updated"
        );
        Ok(())
    }

    async fn update_profile(
        &self,
        identity: &VerifiedIdentity,
        donor_id: DonorId,
        update: ProfileUpdate,
    ) -> Result<(), RegistryError> {
        validate_update(&update, &self.config)?;

        let mut updated = self.current_for_edit(donor_id)?;
        let old_blood_type = updated.blood_type;
        if let Some(name) = update.name {
            updated.name = name;
        }
        if let Some(phone) = update.phone {
            updated.contact.phone = phone;
        }
        if let Some(address) = update.address {
            updated.address = address;
        }
        if let Some(blood_type) = update.blood_type {
            updated.blood_type = blood_type;
        }
        if let Some(eligibility) = update.eligibility {
            updated.eligibility = eligibility;
        }
        updated.updated_at = self.clock.now();

        // Only a blood-type change alters what proximity search sees.
        let effect = if updated.blood_type != old_blood_type {
            ProjectionEffect::Upsert
        } else {
            ProjectionEffect::Keep
        };

        self.persist(&updated).await?;
        self.apply(updated, effect);
        debug!(
            donor_id = %donor_id,
            actor = %identity.subject,
            "donor profile updated"
        );
        Ok(())
    }

    async fn deactivate(
        &self,
        identity: &VerifiedIdentity,
        donor_id: DonorId,
    ) -> Result<(), RegistryError> {
        let mut updated = match self.current_for_edit(donor_id) {
            Ok(record) => record,
            // Terminal transitions are idempotent.
            Err(RegistryError::Deactivated { .. }) => return Ok(()),
            Err(other) => return Err(other),
        };
        updated.status = DonorStatus::Deactivated;
        updated.updated_at = self.clock.now();

        self.persist(&updated).await?;
        self.apply(updated, ProjectionEffect::Remove);
        info!(
            donor_id = %donor_id,
            actor = %identity.subject,
            "donor deactivated"
        );
        Ok(())
    }

    fn get(&self, donor_id: DonorId) -> Option<Donor> {
        self.donors.get(&donor_id).map(|r| r.value().clone())
    }

    fn hydrate(&self, ids: &[DonorId]) -> Vec<Option<Donor>> {
        ids.iter()
            .map(|id| {
                self.donors
                    .get(id)
                    .filter(|r| r.is_active())
                    .map(|r| r.value().clone())
            })
            .collect()
    }

    fn active_donors(&self) -> Vec<Donor> {
        let mut donors: Vec<Donor> = self
            .donors
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.value().clone())
            .collect();
        donors.sort_unstable_by_key(|d| d.id);
        donors
    }

    async fn rebuild_projection(&self) -> Result<usize, RegistryError> {
        let records = self
            .store
            .load_all()
            .await
            .map_err(|e| RegistryError::Storage(e.to_string()))?;

        let mut entries = Vec::with_capacity(records.len());
        for donor in records {
            self.email_index
                .insert(normalize_email(&donor.contact.email), donor.id);
            if donor.is_active() {
                entries.push(ProjectionEntry {
                    donor_id: donor.id,
                    location: donor.location,
                    blood_type: donor.blood_type,
                });
            }
            self.donors.insert(donor.id, donor);
        }

        let projected = self.projection.bulk_load(entries);
        info!(
            donors = self.donors.len(),
            projected, "registry working set rebuilt"
        );
        Ok(projected)
    }
}

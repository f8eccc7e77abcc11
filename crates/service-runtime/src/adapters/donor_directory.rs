//! # Donor Directory Adapter
//!
//! Implements the matching engine's `DonorDirectory` port over the donor
//! registry, so match results carry registry-authoritative records
//! without the engine holding donor state of its own.

use std::sync::Arc;

use hl_02_matching::DonorDirectory;
use hl_03_donor_registry::{RegistryApi, RegistryService};
use shared_types::{Donor, DonorId};

/// Routes record hydration into the donor registry.
pub struct DonorDirectoryAdapter {
    registry: Arc<RegistryService>,
}

impl DonorDirectoryAdapter {
    pub fn new(registry: Arc<RegistryService>) -> Self {
        Self { registry }
    }
}

impl DonorDirectory for DonorDirectoryAdapter {
    fn hydrate(&self, ids: &[DonorId]) -> Vec<Option<Donor>> {
        self.registry.hydrate(ids)
    }
}

//! # Engine Container
//!
//! Holds all subsystem instances and wires them together through the
//! adapter layer.
//!
//! ## Initialization Order
//!
//! Subsystems are initialized in strict dependency order:
//!
//! ```text
//! Phase 1: Persistence backends (no dependencies)
//! Phase 2: Geo Index (no dependencies)
//! Phase 3: Donor Registry (projects into the geo index)
//! Phase 4: Matching Engine (reads the geo index and the registry)
//! Phase 5: Request Lifecycle (drives matching, stores documents)
//! ```
//!
//! ## Thread Safety
//!
//! Every subsystem is internally synchronized and shared behind an
//! `Arc`; the container itself holds no locks.

use std::sync::Arc;

use tracing::{info, instrument};

use hl_01_geo_index::GeoIndex;
use hl_02_matching::MatchingService;
use hl_03_donor_registry::{DonorStore, RegistryService, SystemClock as RegistryClock};
use hl_04_request_lifecycle::{
    BlobStore, LifecycleService, RequestStore, SystemClock as LifecycleClock,
};

use crate::adapters::{
    DonorDirectoryAdapter, DonorLocatorAdapter, GeoProjectionAdapter, InMemoryBlobStore,
    InMemoryDonorStore, InMemoryRequestStore, MatchProviderAdapter,
};
use crate::container::config::{ConfigError, ServiceConfig};

/// Central container holding all subsystem instances.
///
/// This is the main integration point where the subsystems are wired
/// together with the adapters implementing their outbound ports.
pub struct EngineContainer {
    /// Geo Index (Subsystem 1). Populated only through the registry's
    /// location projection.
    pub geo_index: Arc<GeoIndex>,

    /// Donor Registry (Subsystem 3). Owner of donor records.
    pub registry: Arc<RegistryService>,

    /// Matching Engine (Subsystem 2). Pure read path over 1 and 3.
    pub matching: Arc<MatchingService>,

    /// Request Lifecycle (Subsystem 4). Drives matching at submission.
    pub lifecycle: Arc<LifecycleService>,

    /// Durable donor records; kept accessible for startup replay and
    /// failure-injection in tests.
    pub donor_store: Arc<InMemoryDonorStore>,

    /// Durable request records.
    pub request_store: Arc<InMemoryRequestStore>,

    /// Proof document payloads.
    pub blob_store: Arc<InMemoryBlobStore>,

    /// Engine configuration (immutable after initialization).
    pub config: ServiceConfig,
}

impl EngineContainer {
    /// Creates a container with every subsystem initialized and wired.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the configuration fails validation or the geo
    /// index rejects its tuning; nothing is partially constructed.
    #[instrument(name = "engine_init", skip(config))]
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Initializing HemoLink engine container");

        // =====================================================================
        // PHASE 1: Persistence backends
        // =====================================================================
        info!("Phase 1: Creating persistence backends");

        let donor_store = Arc::new(InMemoryDonorStore::new());
        let request_store = Arc::new(InMemoryRequestStore::new());
        let blob_store = Arc::new(InMemoryBlobStore::new());

        // =====================================================================
        // PHASE 2: Geo Index
        // =====================================================================
        let geo_index = Arc::new(
            GeoIndex::new(config.index).map_err(|e| ConfigError::Index(e.to_string()))?,
        );
        info!(
            "Phase 2: [1] Geo Index initialized (cell size {} deg)",
            config.index.cell_size_deg
        );

        // =====================================================================
        // PHASE 3: Donor Registry
        // =====================================================================
        let registry = Arc::new(RegistryService::new(
            Arc::clone(&donor_store) as Arc<dyn DonorStore>,
            Arc::new(GeoProjectionAdapter::new(Arc::clone(&geo_index))),
            Arc::new(RegistryClock),
            config.registry,
        ));
        info!(
            "Phase 3: [3] Donor Registry initialized (ages {}..={}, min {} kg)",
            config.registry.min_age, config.registry.max_age, config.registry.min_weight_kg
        );

        // =====================================================================
        // PHASE 4: Matching Engine
        // =====================================================================
        let matching = Arc::new(MatchingService::new(
            Arc::new(DonorLocatorAdapter::new(Arc::clone(&geo_index))),
            Arc::new(DonorDirectoryAdapter::new(Arc::clone(&registry))),
            config.compatibility.policy(),
            config.matching,
        ));
        info!(
            "Phase 4: [2] Matching Engine initialized (policy {}, default radius {} km)",
            matching.policy_name(),
            config.matching.default_radius_km
        );

        // =====================================================================
        // PHASE 5: Request Lifecycle
        // =====================================================================
        let lifecycle = Arc::new(LifecycleService::new(
            Arc::clone(&blob_store) as Arc<dyn BlobStore>,
            Arc::clone(&request_store) as Arc<dyn RequestStore>,
            Arc::new(MatchProviderAdapter::new(Arc::clone(&matching))),
            Arc::new(LifecycleClock),
            config.documents,
        ));
        info!(
            "Phase 5: [4] Request Lifecycle initialized (document cap {} bytes)",
            config.documents.max_bytes
        );

        info!("All subsystems initialized successfully");

        Ok(Self {
            geo_index,
            registry,
            matching,
            lifecycle,
            donor_store,
            request_store,
            blob_store,
            config,
        })
    }

    // =========================================================================
    // ACCESSOR METHODS
    // =========================================================================

    /// Donor registration and profile management surface.
    pub fn registry(&self) -> Arc<RegistryService> {
        Arc::clone(&self.registry)
    }

    /// Donor matching and donor-map surface.
    pub fn matching(&self) -> Arc<MatchingService> {
        Arc::clone(&self.matching)
    }

    /// Request submission and board surface.
    pub fn lifecycle(&self) -> Arc<LifecycleService> {
        Arc::clone(&self.lifecycle)
    }
}

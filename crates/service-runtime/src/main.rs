//! # HemoLink Engine Runtime
//!
//! The main entry point for the HemoLink donor matching engine.
//!
//! ## Architecture
//!
//! The engine composes four subsystems behind ports, wired by the
//! container with adapters. No subsystem knows another by name; every
//! cross-subsystem call goes through an outbound port.
//!
//! ```text
//! Donor signup ───→ Registry(3) ──location projection──→ Geo Index(1)
//!                       │                                     ↑
//!                 donor store                            ring search
//!                                                             │
//! Request submit ──→ Lifecycle(4) ──────match──────→ Matching(2)
//!                       │                             │         │
//!               blob + request store              locator   directory
//!                                                     │         │
//!                                               Geo Index(1) Registry(3)
//! ```
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and the subsystem container
//! - `adapters/` - Port implementations connecting subsystems
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `HL_*` environment overrides)
//! 2. Initialize subsystems in dependency order (Phase 1 → 5)
//! 3. Replay durable records into the working sets
//! 4. Signal ready
//!
//! ## Subsystems
//!
//! 1. Geo Index (hl-01) - grid-bucketed proximity search
//! 2. Matching Engine (hl-02) - compatibility, dedupe, ranking
//! 3. Donor Registry (hl-03) - donor records and projection
//! 4. Request Lifecycle (hl-04) - submissions and the request board

pub mod adapters;
pub mod container;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hl_03_donor_registry::RegistryApi;
use hl_04_request_lifecycle::LifecycleApi;

use crate::container::{EngineContainer, ServiceConfig};

/// The main engine runtime orchestrating all subsystems.
pub struct EngineRuntime {
    /// Engine container with all initialized services.
    container: Arc<EngineContainer>,
}

impl EngineRuntime {
    /// Creates a runtime with every subsystem initialized and wired.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        info!("Creating HemoLink engine runtime");

        let container =
            EngineContainer::new(config).context("engine container initialization failed")?;

        Ok(Self {
            container: Arc::new(container),
        })
    }

    /// Starts the engine: replays durable records, then signals ready.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  HemoLink Engine Runtime v0.1.0");
        info!("===========================================");

        let donors = self
            .container
            .registry
            .rebuild_projection()
            .await
            .context("donor registry replay failed")?;
        info!(donors, "Donor registry replayed into the working set");

        let requests = self
            .container
            .lifecycle
            .rebuild_board()
            .await
            .context("request board replay failed")?;
        info!(requests, "Request board replayed");

        info!("All subsystems initialized and running");
        info!(
            "Compatibility policy: {}",
            self.container.matching.policy_name()
        );
        info!(
            "Geo index cell size: {} deg",
            self.container.config.index.cell_size_deg
        );
        info!(
            "Default search radius: {} km",
            self.container.config.matching.default_radius_km
        );
        info!(
            "Document cap: {} bytes",
            self.container.config.documents.max_bytes
        );

        Ok(())
    }

    /// Shuts the engine down.
    ///
    /// Every mutation is written through to the stores before its call
    /// returns, so there is no queue to drain and no state to persist.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        info!("Shutdown complete");
    }

    /// Get a reference to the engine container.
    pub fn container(&self) -> Arc<EngineContainer> {
        Arc::clone(&self.container)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = ServiceConfig::load_from_env();

    // Create and start the engine runtime
    let runtime = EngineRuntime::new(config)?;
    runtime.start().await?;

    // Keep the engine running
    info!("Engine is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    // Graceful shutdown
    runtime.shutdown().await;

    Ok(())
}

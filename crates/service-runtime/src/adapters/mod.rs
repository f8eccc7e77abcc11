//! # Adapter Implementations
//!
//! This module provides the concrete adapters that:
//! 1. Implement the **outbound ports** (SPI traits) of each subsystem
//! 2. Bridge subsystems to each other without direct crate coupling
//! 3. Supply in-memory persistence backends for the deployable engine
//!
//! ## Hexagonal Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     OUTER LAYER (Adapters)                          │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │  GeoProjectionAdapter, DonorLocatorAdapter, stores, etc.      │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │                              ↑ implements ↑                         │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    MIDDLE LAYER (Ports)                        │  │
//! │  │  trait LocationProjection, trait DonorLocator, etc.           │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │                              ↑ uses ↑                               │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    INNER LAYER (Domain)                        │  │
//! │  │  Pure business logic - no I/O, no async, no external deps     │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod donor_directory;
pub mod donor_locator;
pub mod geo_projection;
pub mod match_provider;
pub mod stores;

pub use donor_directory::*;
pub use donor_locator::*;
pub use geo_projection::*;
pub use match_provider::*;
pub use stores::*;

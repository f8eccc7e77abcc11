//! # Donor Registry Subsystem
//!
//! **Subsystem ID:** 3
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Authoritative owner of donor records and their lifecycle. Holds the
//! working set in memory for lock-free reads, writes every mutation
//! through a durable store before it takes effect, and keeps the geo
//! index in sync through a location projection port.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Email is unique across all donors, active or not | `service.rs` - `register()` reservation |
//! | INVARIANT-2 | Persist before apply: a failed store write leaves no trace | `service.rs` - every mutating operation |
//! | INVARIANT-3 | Deactivation is terminal; records are never deleted | `service.rs` - `deactivate()` |
//! | INVARIANT-4 | The location projection carries active donors only | `service.rs` - projection calls |
//! | INVARIANT-5 | Eligibility is captured at registration, never re-validated | `domain/validation.rs` |
//!
//! ## Outbound Dependencies
//!
//! | Concern | Trait | Provided By |
//! |---------|-------|-------------|
//! | Durable donor records | `DonorStore` | runtime store adapter |
//! | Geo index sync | `LocationProjection` | geo index adapter |
//! | Timestamps | `Clock` | system clock |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      SERVICE LAYER                              │
//! │  service.rs - RegistryService (implements RegistryApi)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PORTS LAYER                                │
//! │  ports/inbound.rs  - RegistryApi trait                          │
//! │  ports/outbound.rs - DonorStore, LocationProjection, Clock      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER                               │
//! │  domain/validation.rs - registration and edit constraints       │
//! │  domain/entities.rs   - NewDonor, ProfileUpdate, config         │
//! │  domain/errors.rs     - RegistryError enum                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::RegistryService;

//! # Matching Engine Subsystem
//!
//! **Subsystem ID:** 2
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Turns a blood request into an ordered list of reachable, biologically
//! compatible donors. Candidate discovery and donor records come in
//! through outbound ports; which donor types satisfy a request is decided
//! by an injected compatibility policy.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Radius accepted only in (0, 500] km | `service.rs` - `validate_radius()` |
//! | INVARIANT-2 | One result row per donor | `domain/ranking.rs` - `dedupe_nearest()` |
//! | INVARIANT-3 | Deterministic order (distance, donor id) | `domain/ranking.rs` - `rank()` |
//! | INVARIANT-4 | Matching never mutates donors or the index | read-only outbound ports |
//! | INVARIANT-5 | Timeout is an error, never a short list | `service.rs` - locator error mapping |
//!
//! ## Outbound Dependencies
//!
//! | Concern | Trait | Provided By |
//! |---------|-------|-------------|
//! | Candidate discovery | `DonorLocator` | geo index adapter |
//! | Donor records | `DonorDirectory` | donor registry adapter |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      SERVICE LAYER                              │
//! │  service.rs - MatchingService (implements MatchingApi)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PORTS LAYER                                │
//! │  ports/inbound.rs  - MatchingApi trait                          │
//! │  ports/outbound.rs - DonorLocator, DonorDirectory traits        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER                               │
//! │  domain/compatibility.rs - policies over the ABO/Rh matrix      │
//! │  domain/ranking.rs       - dedupe and deterministic ordering    │
//! │  domain/entities.rs      - MatchQuery, NearbyQuery, config      │
//! │  domain/errors.rs        - MatchError enum                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::MatchingService;

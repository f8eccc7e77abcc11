//! # Request Lifecycle Subsystem
//!
//! **Subsystem ID:** 4
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Owns blood requests from submission to the board. A submission
//! validates the request and its proof document, stores the document,
//! runs one match, and persists the request with the match result
//! frozen inside it. Later donor changes never rewrite history.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Document ≤ size cap, extension in the allow-list | `domain/documents.rs` - `validate_document()` |
//! | INVARIANT-2 | Matching runs exactly once per submission | `service.rs` - `submit()` |
//! | INVARIANT-3 | The match snapshot is immutable after submission | snapshot frozen inside the stored record |
//! | INVARIANT-4 | Persist is all-or-nothing; resubmission after failure is safe | `service.rs` - persist-before-apply |
//! | INVARIANT-5 | New requests start `Pending` | `service.rs` - `submit()` |
//!
//! ## Outbound Dependencies
//!
//! | Concern | Trait | Provided By |
//! |---------|-------|-------------|
//! | Proof document bytes | `BlobStore` | runtime blob adapter |
//! | Durable request records | `RequestStore` | runtime store adapter |
//! | Donor matching | `MatchProvider` | matching engine adapter |
//! | Timestamps | `Clock` | system clock |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      SERVICE LAYER                              │
//! │  service.rs - LifecycleService (implements LifecycleApi)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PORTS LAYER                                │
//! │  ports/inbound.rs  - LifecycleApi trait                         │
//! │  ports/outbound.rs - BlobStore, RequestStore, MatchProvider,    │
//! │                      Clock                                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER                               │
//! │  domain/documents.rs  - proof document policy                   │
//! │  domain/validation.rs - request field constraints               │
//! │  domain/entities.rs   - NewRequest, BloodRequest, snapshot      │
//! │  domain/errors.rs     - LifecycleError enum                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::LifecycleService;

//! # Geo Index Subsystem
//!
//! **Subsystem ID:** 1
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Answers one question fast: which donors sit within a radius of a point?
//! Donor locations are bucketed into a fixed-precision grid over the
//! coordinate plane; proximity queries walk expanding rings of cells
//! outward from the origin and filter candidates with the exact haversine
//! distance.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | One placement per donor | `domain/index.rs` - placement map keyed by donor id |
//! | INVARIANT-2 | Relocation inserts before it removes | `domain/index.rs` - `upsert()` ordering |
//! | INVARIANT-3 | Ring pruning never skips an in-radius donor | `domain/cell.rs` - `min_distance_km()` lower bound |
//! | INVARIANT-4 | Deterministic result order | `domain/index.rs` - sort by (distance, donor id) |
//! | INVARIANT-5 | Expired deadline aborts, never truncates | `domain/index.rs` - `query()` ring loop |
//!
//! ## Concurrency Model
//!
//! Cells live in a sharded concurrent map; readers never block readers.
//! Each donor's current cell is tracked in a placement map whose entry
//! lock serializes concurrent upserts of the same donor. A query that
//! races a relocation may observe the donor in both the old and the new
//! cell; callers dedupe by donor id.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PORTS LAYER                                │
//! │  ports/inbound.rs - GeoIndexApi trait                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER                               │
//! │  domain/geo.rs      - haversine distance, Earth constants       │
//! │  domain/cell.rs     - Grid, CellKey, ring enumeration           │
//! │  domain/entities.rs - CellEntry, ProximityHit, config, stats    │
//! │  domain/index.rs    - GeoIndex concurrent structure             │
//! │  domain/errors.rs   - GeoIndexError enum                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This subsystem has no outbound dependencies.

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;

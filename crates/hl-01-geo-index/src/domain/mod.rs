//! # Domain Layer - Geo Index Subsystem
//!
//! Pure spatial logic with no I/O.
//!
//! ## Components
//!
//! - `geo`: haversine distance on the mean-radius sphere
//! - `cell`: grid quantization, cell geometry, ring enumeration
//! - `entities`: cell entries, query hits, configuration, stats
//! - `index`: the concurrent `GeoIndex` structure
//! - `errors`: `GeoIndexError` enumeration

pub mod cell;
pub mod entities;
pub mod errors;
pub mod geo;
pub mod index;

pub use cell::*;
pub use entities::*;
pub use errors::*;
pub use geo::*;
pub use index::*;

//! # Shared Types Crate
//!
//! This crate contains all domain entities and value types shared across
//! HemoLink subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Validated Construction**: Value types that carry invariants
//!   (`Coordinate`, `BloodType`) cannot be built in an invalid state.
//! - **No Transport Concerns**: Subsystems exchange these types through
//!   in-process ports; no wire envelope is defined here.

pub mod blood;
pub mod entities;
pub mod errors;
pub mod geo;
pub mod identity;
pub mod time;

pub use blood::{BloodType, BloodTypeSet, ParseBloodTypeError};
pub use entities::*;
pub use errors::*;
pub use geo::{Coordinate, CoordinateError};
pub use identity::VerifiedIdentity;
pub use time::Deadline;

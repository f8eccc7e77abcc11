//! # Domain Layer - Donor Registry Subsystem
//!
//! Pure registration logic with no I/O.
//!
//! ## Components
//!
//! - `validation`: field constraints applied at registration and edit
//! - `entities`: `NewDonor`, `ProfileUpdate`, `ProjectionEntry`, config
//! - `errors`: `RegistryError` enumeration

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use validation::*;

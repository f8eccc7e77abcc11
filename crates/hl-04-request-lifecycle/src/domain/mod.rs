//! # Domain Layer - Request Lifecycle Subsystem
//!
//! Pure request logic with no I/O.
//!
//! ## Components
//!
//! - `documents`: proof document policy (size cap, extension allow-list)
//! - `validation`: request field constraints
//! - `entities`: `NewRequest`, `BloodRequest`, `MatchSnapshot`, receipt
//! - `errors`: `LifecycleError` enumeration

pub mod documents;
pub mod entities;
pub mod errors;
pub mod validation;

pub use documents::*;
pub use entities::*;
pub use errors::*;
pub use validation::*;

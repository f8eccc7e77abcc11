//! # Domain Layer - Matching Engine Subsystem
//!
//! Pure matching logic with no I/O.
//!
//! ## Components
//!
//! - `compatibility`: `CompatibilityPolicy` trait and the two shipped
//!   policies (exact match, medical ABO/Rh matrix)
//! - `ranking`: dedupe and deterministic result ordering
//! - `entities`: query types and configuration
//! - `errors`: `MatchError` enumeration

pub mod compatibility;
pub mod entities;
pub mod errors;
pub mod ranking;

pub use compatibility::*;
pub use entities::*;
pub use errors::*;
pub use ranking::*;

//! Ports layer for the Geo Index subsystem.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to other subsystems
//!
//! The index has no outbound dependencies.

pub mod inbound;

pub use inbound::*;

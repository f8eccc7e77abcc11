//! Ports layer for the Donor Registry subsystem.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to other subsystems
//! - Outbound (Driven) ports: dependencies on durable storage, the
//!   location projection, and the clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

//! Ports layer for the Matching Engine subsystem.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to other subsystems
//! - Outbound (Driven) ports: dependencies on candidate discovery and
//!   donor records

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

//! Ports layer for the Request Lifecycle subsystem.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: API exposed to other subsystems
//! - Outbound (Driven) ports: dependencies on document storage, request
//!   storage, the matching engine, and the clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

//! # Engine Container
//!
//! Central container holding all subsystem instances with proper
//! lifetime management and dependency injection.
//!
//! - Subsystems initialized in dependency order (index → registry →
//!   matching → lifecycle)
//! - Inter-subsystem calls go through ports only; the adapters in
//!   [`crate::adapters`] connect them

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, ServiceConfig};
pub use subsystems::EngineContainer;

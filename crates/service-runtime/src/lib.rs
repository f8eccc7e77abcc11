//! # Service Runtime Library
//!
//! This library exposes the internal modules of the engine runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **DDD (Domain-Driven Design)**: Each subsystem owns its domain logic
//! - **Hexagonal Architecture**: Ports define contracts, Adapters implement
//!   them
//! - **Composition Root**: All wiring happens in `container/`; subsystems
//!   never reference each other directly

pub mod adapters;
pub mod container;

//! # Integration Tests
//!
//! Cross-subsystem choreography: each test wires the real engine container
//! (no mocks) and drives it through the same call paths the runtime binary
//! exposes.

pub mod concurrency;
pub mod flows;

//! # HemoLink Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared builders for donors, requests, engines
//! │
//! └── integration/      # Cross-subsystem choreography
//!     ├── flows.rs      # Register → match → submit flows
//!     └── concurrency.rs# Parallel access and race behavior
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hl-tests
//!
//! # By category
//! cargo test -p hl-tests integration::flows::
//! cargo test -p hl-tests integration::concurrency::
//!
//! # Benchmarks
//! cargo bench -p hl-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fixtures;
pub mod integration;

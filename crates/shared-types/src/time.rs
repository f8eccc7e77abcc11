//! # Deadlines
//!
//! A monotonic cut-off passed along read paths so long scans can abort
//! instead of outliving their caller's patience. `Deadline::NONE` means
//! the caller imposed no limit.

use std::time::{Duration, Instant};

/// A point on the monotonic clock after which work should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No cut-off; checks always report unexpired.
    pub const NONE: Deadline = Deadline(None);

    /// A deadline `timeout` from now. Saturates to no cut-off on overflow.
    pub fn after(timeout: Duration) -> Self {
        Deadline(Instant::now().checked_add(timeout))
    }

    /// A deadline at an explicit instant.
    pub fn at(when: Instant) -> Self {
        Deadline(Some(when))
    }

    /// True once the cut-off has passed.
    pub fn is_expired(&self) -> bool {
        match self.0 {
            Some(when) => Instant::now() >= when,
            None => false,
        }
    }

    /// Time left before the cut-off, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.0.map(|when| when.saturating_duration_since(Instant::now()))
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Deadline::NONE
    }
}

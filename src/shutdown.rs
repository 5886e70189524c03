//! Process-wide stop flag.
//!
//! The ctrlc handler calls `request()`; the watch loop checks `is_requested()`
//! between waits and stops once the current pass has finished.
//! Relaxed ordering is enough for a one-way flag.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Ask the watch loop to stop (idempotent, signal-safe).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Test-only: clear the flag.
#[cfg(test)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}

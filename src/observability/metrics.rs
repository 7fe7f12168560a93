//! Validation counters
//!
//! - Counters only, monotonic
//! - Thread-safe; share behind an `Arc` across validators

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for validation outcomes.
///
/// Relaxed ordering is enough: counters are independent of each other.
#[derive(Debug, Default)]
pub struct ValidationMetrics {
    /// Runs that passed
    passed: AtomicU64,
    /// Runs that failed on a schema violation
    failed: AtomicU64,
    /// Raw inputs rejected by the decoder
    malformed_inputs: AtomicU64,
}

impl ValidationMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a run that conformed
    pub fn increment_passed(&self) {
        self.passed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a run that produced at least one failure
    pub fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts raw text rejected before validation
    pub fn increment_malformed_inputs(&self) {
        self.malformed_inputs.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            passed: self.passed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            malformed_inputs: self.malformed_inputs.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`ValidationMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub passed: u64,
    pub failed: u64,
    pub malformed_inputs: u64,
}

impl MetricsSnapshot {
    /// Total validation runs, including rejected inputs
    pub fn total(&self) -> u64 {
        self.passed + self.failed + self.malformed_inputs
    }
}

//! Interaction outcome counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts dispatched interactions by outcome.
///
/// Pings are answered before dispatch and are not counted.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    total: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`DispatchMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Interactions dispatched.
    pub total: u64,
    /// Interactions that completed without error.
    pub successful: u64,
    /// Interactions that ended in a dispatch error.
    pub failed: u64,
}

impl DispatchMetrics {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome.
    pub fn record(&self, success: bool) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Reads the current counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            successful: self.successful.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

//! Rate limiting for drop warnings.
//!
//! Producers on many threads may drop records at once when the queue is
//! full; the worker may drop datagrams the network refuses. Both report
//! through one [`RateLimitedWarner`] each so a flood of drops turns into a
//! single warning per interval carrying the count.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Minimum spacing between two drop warnings.
pub const DEFAULT_WARN_INTERVAL: Duration = Duration::from_secs(5);

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Counts drops and reports them at most once per interval.
///
/// Call [`record_drop`](Self::record_drop) for every lost record, then
/// [`warn_if_due`](Self::warn_if_due). [`flush`](Self::flush) reports any
/// outstanding count regardless of the interval.
#[derive(Debug)]
pub struct RateLimitedWarner {
    interval_secs: u64,
    last_warn: AtomicU64,
    dropped: AtomicU64,
}

impl Default for RateLimitedWarner {
    fn default() -> Self {
        Self::new(DEFAULT_WARN_INTERVAL)
    }
}

impl RateLimitedWarner {
    /// The first warning is due immediately.
    pub fn new(interval: Duration) -> Self {
        let interval_secs = interval.as_secs();
        Self {
            interval_secs,
            last_warn: AtomicU64::new(now_secs().saturating_sub(interval_secs)),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn record_drop(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Drops counted but not yet reported.
    pub fn pending(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Report the pending count if the interval has elapsed.
    ///
    /// Concurrent callers race for the slot; only the winner reports.
    pub fn warn_if_due(&self, warn: impl FnOnce(u64)) {
        let now = now_secs();
        let prev = self.last_warn.load(Ordering::Relaxed);
        if now.saturating_sub(prev) < self.interval_secs {
            return;
        }
        if self
            .last_warn
            .compare_exchange(prev, now, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return;
        }
        self.report(warn);
    }

    /// Report the pending count now.
    pub fn flush(&self, warn: impl FnOnce(u64)) {
        if self.report(warn) {
            self.last_warn.store(now_secs(), Ordering::Relaxed);
        }
    }

    fn report(&self, warn: impl FnOnce(u64)) -> bool {
        let count = self.dropped.swap(0, Ordering::Relaxed);
        if count == 0 {
            return false;
        }
        warn(count);
        true
    }
}

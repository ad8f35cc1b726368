//! Upstream-down tracking state.
//!
//! # Lifecycle
//! - Created once at startup with `last_successful_trusted_fetch` at the epoch
//! - Moved forward by the evaluator whenever a trusted height is non-zero
//! - Never reset, never persisted
//!
//! Starting at the epoch means that if every trusted endpoint is down from
//! the first request, the probe is unhealthy immediately.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Process-wide timestamp of the last successful trusted fetch.
#[derive(Debug, Default)]
pub struct UpstreamTracker {
    /// Unix time in milliseconds; 0 = never.
    last_success_ms: AtomicU64,
}

impl UpstreamTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful trusted fetch. Concurrent callers can only move
    /// the timestamp forward.
    pub fn record_success(&self, now: SystemTime) {
        self.last_success_ms
            .fetch_max(unix_millis(now), Ordering::Relaxed);
    }

    pub fn last_success(&self) -> Option<SystemTime> {
        match self.last_success_ms.load(Ordering::Relaxed) {
            0 => None,
            ms => Some(UNIX_EPOCH + Duration::from_millis(ms)),
        }
    }

    /// Time since the last successful trusted fetch (since the epoch if none).
    pub fn elapsed_since_success(&self, now: SystemTime) -> Duration {
        let last = self.last_success_ms.load(Ordering::Relaxed);
        Duration::from_millis(unix_millis(now).saturating_sub(last))
    }
}

fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

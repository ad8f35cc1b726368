//! Health verdict.
//!
//! # Evaluation
//! ```text
//! FETCHING  → ParallelFetcher::fetch_all
//! DECIDING  → trusted height = max of trusted readings
//!           → all trusted down longer than tolerance?  UpstreamsUnavailable
//!           → trusted height > 0?                      record success
//!           → behind = max(trusted - local, 0)
//!           → behind > threshold?                      BehindThreshold
//!           → HEALTHY
//! ```
//!
//! No retries: one request performs exactly one evaluation. The only state
//! carried between evaluations is the [`UpstreamTracker`].

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::health::error::HealthError;
use crate::health::fetcher::ParallelFetcher;
use crate::health::snapshot::Snapshot;
use crate::health::threshold::{ThresholdError, ThresholdSource};
use crate::health::tracker::UpstreamTracker;
use crate::observability::metrics;
use crate::rpc::{HeightSource, SENTINEL_HEIGHT};

/// Lag figures behind a healthy verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub local: u64,
    pub upstream: u64,
    /// Blocks behind, clamped at zero when local is ahead.
    pub behind: u64,
    pub threshold: u64,
}

pub struct HealthEvaluator<S> {
    fetcher: ParallelFetcher<S>,
    threshold: Arc<dyn ThresholdSource>,
    tracker: Arc<UpstreamTracker>,
    tolerance: Duration,
}

impl<S: HeightSource> HealthEvaluator<S> {
    pub fn new(
        fetcher: ParallelFetcher<S>,
        threshold: Arc<dyn ThresholdSource>,
        tracker: Arc<UpstreamTracker>,
        tolerance: Duration,
    ) -> Self {
        Self {
            fetcher,
            threshold,
            tracker,
            tolerance,
        }
    }

    pub fn tracker(&self) -> &UpstreamTracker {
        &self.tracker
    }

    /// Fetch all heights without judging them.
    pub async fn status(&self) -> Snapshot {
        self.fetcher.fetch_all().await
    }

    /// Fetch all heights and judge them.
    pub async fn evaluate(&self) -> Result<Snapshot, HealthError> {
        let (snapshot, threshold) = tokio::join!(self.fetcher.fetch_all(), self.resolve_threshold());
        tracing::info!(slots = %snapshot, "Fetched heights");

        match self.judge(&snapshot, SystemTime::now(), threshold) {
            Ok(assessment) => {
                metrics::record_evaluation("healthy");
                metrics::record_blocks_behind(assessment.behind);
                Ok(snapshot)
            }
            Err(e) => {
                metrics::record_evaluation(e.kind());
                tracing::warn!(kind = e.kind(), error = %e, "Validator unhealthy");
                Err(e)
            }
        }
    }

    /// Look up the threshold off the async workers.
    async fn resolve_threshold(&self) -> Result<u64, ThresholdError> {
        let source = Arc::clone(&self.threshold);
        tokio::task::spawn_blocking(move || source.resolve())
            .await
            .map_err(ThresholdError::Lookup)?
    }

    /// Judge a snapshot as of `now`.
    ///
    /// An upstreams-unavailable verdict takes precedence over a threshold
    /// error.
    pub fn judge(
        &self,
        snapshot: &Snapshot,
        now: SystemTime,
        threshold: Result<u64, ThresholdError>,
    ) -> Result<Assessment, HealthError> {
        let local = snapshot.local_height();
        let upstream = snapshot.best_trusted_height();

        if upstream == SENTINEL_HEIGHT {
            let since_last_success = self.tracker.elapsed_since_success(now);
            if since_last_success > self.tolerance {
                return Err(HealthError::UpstreamsUnavailable {
                    tolerance: self.tolerance,
                    since_last_success,
                });
            }
            tracing::info!(
                since_last_success_ms = since_last_success.as_millis() as u64,
                "All trusted endpoints failed, within tolerance window"
            );
        } else {
            self.tracker.record_success(now);
        }

        let behind = match upstream.checked_sub(local) {
            Some(behind) => behind,
            None => {
                if upstream != SENTINEL_HEIGHT {
                    tracing::info!(
                        local_height = local,
                        upstream_height = upstream,
                        "Local block height is greater than upstreams"
                    );
                }
                0
            }
        };

        let threshold = threshold?;
        if behind > threshold {
            return Err(HealthError::BehindThreshold {
                local,
                upstream,
                behind,
                threshold,
            });
        }

        Ok(Assessment {
            local,
            upstream,
            behind,
            threshold,
        })
    }
}

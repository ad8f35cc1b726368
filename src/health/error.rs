//! Evaluation errors.
//!
//! Per-endpoint fetch failures never appear here: they are absorbed by the
//! client as sentinel heights.

use std::time::Duration;

use thiserror::Error;

use crate::health::threshold::ThresholdError;

#[derive(Debug, Error)]
pub enum HealthError {
    /// Every trusted endpoint has failed for longer than the tolerance window.
    #[error("All trusted endpoints have been returning errors for more than {} seconds", .tolerance.as_secs())]
    UpstreamsUnavailable {
        tolerance: Duration,
        since_last_success: Duration,
    },

    /// The local validator lags the best trusted height by more than the threshold.
    #[error("Local validator is behind trusted validator by more than {threshold} blocks")]
    BehindThreshold {
        local: u64,
        upstream: u64,
        behind: u64,
        threshold: u64,
    },

    /// The threshold override exists but cannot be used.
    #[error("Invalid threshold configuration: {0}")]
    ThresholdConfig(#[from] ThresholdError),
}

impl HealthError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            HealthError::UpstreamsUnavailable { .. } => "upstreams_unavailable",
            HealthError::BehindThreshold { .. } => "behind_threshold",
            HealthError::ThresholdConfig(_) => "threshold_config",
        }
    }
}

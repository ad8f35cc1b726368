//! Health evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! /health request
//!     → evaluator.rs (one evaluation per request)
//!     → fetcher.rs (fan-out to every endpoint, join all)
//!     → rpc client (×N, concurrent, sentinel on failure)
//!     → snapshot.rs (name → height)
//!     → evaluator.rs consults threshold.rs and tracker.rs
//!     → Healthy(snapshot) | HealthError
//! ```
//!
//! # Design Decisions
//! - The best trusted height is the max, so one reachable trusted node suffices
//! - Total trusted outage is tolerated for a grace window before it fails
//! - Local ahead of trusted is clamped to zero lag, never a failure
//! - The threshold is resolved fresh on every evaluation

pub mod endpoints;
pub mod error;
pub mod evaluator;
pub mod fetcher;
pub mod snapshot;
pub mod threshold;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use endpoints::{Endpoint, EndpointError, EndpointSet};
pub use error::HealthError;
pub use evaluator::{Assessment, HealthEvaluator};
pub use fetcher::ParallelFetcher;
pub use snapshot::{HeightReading, Snapshot};
pub use threshold::{FileThreshold, FixedThreshold, ThresholdError, ThresholdSource};
pub use tracker::UpstreamTracker;

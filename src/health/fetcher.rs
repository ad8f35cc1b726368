//! Parallel height fetching.
//!
//! # Concurrency
//! ```text
//! fetch_all
//!     → spawn one task per endpoint, each with its own timeout
//!     → join_all (waits for every task, success or sentinel)
//!     → Snapshot in endpoint set order
//! ```
//!
//! A slow endpoint never extends another endpoint's budget, so a fetch
//! finishes within roughly one timeout regardless of endpoint count.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time;

use crate::health::endpoints::EndpointSet;
use crate::health::snapshot::{HeightReading, Snapshot};
use crate::observability::metrics;
use crate::rpc::{HeightSource, SENTINEL_HEIGHT};

pub struct ParallelFetcher<S> {
    source: Arc<S>,
    endpoints: Arc<EndpointSet>,
    timeout: Duration,
}

impl<S: HeightSource> ParallelFetcher<S> {
    pub fn new(source: Arc<S>, endpoints: Arc<EndpointSet>, timeout: Duration) -> Self {
        Self {
            source,
            endpoints,
            timeout,
        }
    }

    /// Query every endpoint concurrently and wait for all of them.
    pub async fn fetch_all(&self) -> Snapshot {
        let tasks = self.endpoints.iter().map(|endpoint| {
            let source = Arc::clone(&self.source);
            let url = endpoint.url.clone();
            let budget = self.timeout;

            tokio::spawn(async move {
                match time::timeout(budget, source.fetch_height(&url)).await {
                    Ok(height) => height,
                    Err(_) => {
                        tracing::info!(
                            url = %url,
                            timeout_ms = budget.as_millis() as u64,
                            "Height query timed out"
                        );
                        SENTINEL_HEIGHT
                    }
                }
            })
        });

        let results = join_all(tasks).await;

        let readings = self
            .endpoints
            .iter()
            .zip(results)
            .map(|(endpoint, result)| {
                let height = result.unwrap_or_else(|e| {
                    tracing::warn!(endpoint = %endpoint.name, error = %e, "Height query task failed");
                    SENTINEL_HEIGHT
                });
                let reading = HeightReading {
                    name: endpoint.name.clone(),
                    height,
                    local: endpoint.local,
                };
                metrics::record_height(&reading);
                reading
            })
            .collect();

        Snapshot::new(readings)
    }
}

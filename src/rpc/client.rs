//! Chain height client with timeout and error handling.
//!
//! # Responsibilities
//! - Query one JSON-RPC endpoint for its current slot
//! - Bound every query with a short timeout
//! - Swallow every failure into the sentinel height
//!
//! # Design Decisions
//! - One unreachable endpoint must never abort evaluation of the others,
//!   so `fetch_height` has no error path
//! - A single `reqwest::Client` is shared for connection reuse

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::config::RpcConfig;
use crate::rpc::types::{CommitmentConfig, EpochInfo, RpcRequest, RpcResponse, RpcResult, SENTINEL_HEIGHT};

/// Anything that can report a chain height for an endpoint URL.
///
/// Implementations must not fail: an unreachable endpoint reports
/// [`SENTINEL_HEIGHT`].
pub trait HeightSource: Send + Sync + 'static {
    fn fetch_height(&self, url: &Url) -> impl Future<Output = u64> + Send;
}

/// JSON-RPC client querying `getEpochInfo`.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    commitment: String,
    timeout: Duration,
}

impl RpcClient {
    /// Create a new client from configuration.
    pub fn new(config: &RpcConfig) -> RpcResult<Self> {
        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("validator-health/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            commitment: config.commitment.clone(),
            timeout,
        })
    }

    /// Fetch epoch info from a node.
    pub async fn get_epoch_info(&self, url: &Url) -> RpcResult<EpochInfo> {
        let request = RpcRequest::new(
            "getEpochInfo",
            [CommitmentConfig {
                commitment: &self.commitment,
            }],
        );

        let response = self
            .http
            .post(url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        response.json::<RpcResponse<EpochInfo>>().await?.into_result()
    }
}

impl HeightSource for RpcClient {
    async fn fetch_height(&self, url: &Url) -> u64 {
        match self.get_epoch_info(url).await {
            Ok(info) => {
                tracing::debug!(url = %url, slot = info.absolute_slot, epoch = info.epoch, "Fetched epoch info");
                info.absolute_slot
            }
            Err(e) => {
                tracing::info!(url = %url, error = %e, "Received error fetching block height");
                SENTINEL_HEIGHT
            }
        }
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("commitment", &self.commitment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

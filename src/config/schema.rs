//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the probe.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the health probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Nodes to poll. Exactly one is the local validator, the rest are trusted.
    pub endpoints: Vec<EndpointConfig>,

    /// Height query settings.
    pub rpc: RpcConfig,

    /// Health verdict settings.
    pub health: HealthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            endpoints: vec![
                EndpointConfig::local("local", "http://localhost:8899"),
                EndpointConfig::trusted("mainnet", "http://vip-api.mainnet-beta.solana.com"),
                EndpointConfig::trusted("cluster", "https://solana-api.projectserum.com"),
            ],
            rpc: RpcConfig::default(),
            health: HealthConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9090").
    pub bind_address: String,

    /// Whole-request timeout for `/status` and `/health` in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9090".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// A single node the probe polls.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Symbolic name, used as the key in reports.
    pub name: String,

    /// JSON-RPC base URL.
    pub url: String,

    /// Marks the validator being checked.
    #[serde(default)]
    pub local: bool,
}

impl EndpointConfig {
    pub fn local(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            local: true,
        }
    }

    pub fn trusted(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            local: false,
        }
    }
}

/// Height query configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Per-endpoint request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Commitment level passed to `getEpochInfo`.
    pub commitment: String,
}

impl RpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            commitment: "single".to_string(),
        }
    }
}

/// Health verdict configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Default maximum tolerated lag in blocks.
    pub unhealthy_block_threshold: u64,

    /// How long every trusted endpoint may fail before that alone is unhealthy.
    pub upstream_down_tolerance_secs: u64,

    /// Directory holding the optional override files.
    pub data_dir: PathBuf,

    /// File name (inside `data_dir`) of the threshold override.
    pub threshold_file: String,
}

impl HealthConfig {
    pub fn threshold_path(&self) -> PathBuf {
        self.data_dir.join(&self.threshold_file)
    }

    pub fn upstream_down_tolerance(&self) -> Duration {
        Duration::from_secs(self.upstream_down_tolerance_secs)
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            unhealthy_block_threshold: 15,
            upstream_down_tolerance_secs: 30,
            data_dir: PathBuf::from("data"),
            threshold_file: "unhealthy_block_threshold".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9091".to_string(),
        }
    }
}

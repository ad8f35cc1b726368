//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file or defaults, then command-line overrides)
//! - Build the endpoint set, rpc client and evaluator
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, ProbeConfig};
use crate::health::{
    EndpointError, EndpointSet, FileThreshold, HealthEvaluator, ParallelFetcher, UpstreamTracker,
};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::rpc::{RpcClient, RpcError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("endpoint error: {0}")]
    Endpoints(#[from] EndpointError),

    #[error("rpc client error: {0}")]
    Rpc(#[from] RpcError),

    #[error("metrics exporter error: {0}")]
    Metrics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Load the config file (or defaults), apply overrides, then validate.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<ProbeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };

    if let Some(bind_address) = overrides.bind_address {
        config.listener.bind_address = bind_address;
    }
    if let Some(data_dir) = overrides.data_dir {
        config.health.data_dir = data_dir;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Wire the evaluator from configuration.
pub fn build_evaluator(config: &ProbeConfig) -> Result<HealthEvaluator<RpcClient>, StartupError> {
    let endpoints = Arc::new(EndpointSet::from_config(&config.endpoints)?);
    tracing::info!(
        local = %endpoints.local().url,
        trusted = ?endpoints.trusted().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        "Endpoint set ready"
    );
    let client = Arc::new(RpcClient::new(&config.rpc)?);
    let fetcher = ParallelFetcher::new(client, endpoints, config.rpc.timeout());

    let threshold = Arc::new(FileThreshold::new(
        config.health.threshold_path(),
        config.health.unhealthy_block_threshold,
    ));

    Ok(HealthEvaluator::new(
        fetcher,
        threshold,
        Arc::new(UpstreamTracker::new()),
        config.health.upstream_down_tolerance(),
    ))
}

/// Run the probe until SIGINT/SIGTERM.
pub async fn run(config: ProbeConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoints = config.endpoints.len(),
        rpc_timeout_ms = config.rpc.timeout_ms,
        default_threshold = config.health.unhealthy_block_threshold,
        tolerance_secs = config.health.upstream_down_tolerance_secs,
        threshold_file = %config.health.threshold_path().display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let evaluator = Arc::new(build_evaluator(&config)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    HttpServer::new(evaluator, &config.listener)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

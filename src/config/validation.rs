//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Exactly one local endpoint, at least one trusted endpoint
//! - Endpoint names unique, URLs well-formed
//! - Value ranges (timeouts > 0, addresses parse)
//! - The request timeout outlasts one rpc timeout, so `/health` always
//!   answers with a verdict rather than a bare timeout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProbeConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("expected exactly one local endpoint, found {0}")]
    LocalEndpointCount(usize),

    #[error("at least one trusted endpoint is required")]
    NoTrustedEndpoints,

    #[error("endpoint name must not be empty")]
    EmptyEndpointName,

    #[error("duplicate endpoint name '{0}'")]
    DuplicateEndpoint(String),

    #[error("endpoint '{name}' has invalid url '{url}'")]
    EndpointUrl { name: String, url: String },

    #[error("rpc timeout must be greater than zero")]
    ZeroTimeout,

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("request timeout ({request_timeout_secs}s) must exceed rpc timeout ({rpc_timeout_ms}ms)")]
    RequestTimeoutTooShort {
        request_timeout_secs: u64,
        rpc_timeout_ms: u64,
    },

    #[error("unhealthy block threshold must be greater than zero")]
    ZeroThreshold,

    #[error("threshold file name must not be empty")]
    EmptyThresholdFile,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let locals = config.endpoints.iter().filter(|e| e.local).count();
    if locals != 1 {
        errors.push(ValidationError::LocalEndpointCount(locals));
    }
    if !config.endpoints.iter().any(|e| !e.local) {
        errors.push(ValidationError::NoTrustedEndpoints);
    }

    let mut seen = HashSet::new();
    for endpoint in &config.endpoints {
        if endpoint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyEndpointName);
        } else if !seen.insert(endpoint.name.as_str()) {
            errors.push(ValidationError::DuplicateEndpoint(endpoint.name.clone()));
        }

        let valid_url = Url::parse(&endpoint.url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid_url {
            errors.push(ValidationError::EndpointUrl {
                name: endpoint.name.clone(),
                url: endpoint.url.clone(),
            });
        }
    }

    if config.rpc.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.listener.request_timeout_secs > 0
        && config.rpc.timeout_ms >= config.listener.request_timeout_secs.saturating_mul(1000)
    {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_timeout_secs: config.listener.request_timeout_secs,
            rpc_timeout_ms: config.rpc.timeout_ms,
        });
    }
    if config.health.unhealthy_block_threshold == 0 {
        errors.push(ValidationError::ZeroThreshold);
    }
    if config.health.threshold_file.trim().is_empty() {
        errors.push(ValidationError::EmptyThresholdFile);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

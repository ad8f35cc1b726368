//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the probe handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until the shutdown signal fires
//!
//! # Routes
//! - `GET /`       plain greeting with the hostname
//! - `GET /status` every endpoint height, no verdict
//! - `GET /health` heights when healthy, 500 otherwise

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ListenerConfig;
use crate::health::{HealthError, HealthEvaluator, Snapshot};
use crate::http::response::ApiSuccess;
use crate::rpc::HeightSource;

/// Application state injected into handlers.
pub struct AppState<S> {
    pub evaluator: Arc<HealthEvaluator<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}

/// HTTP server for the health probe.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an evaluator.
    pub fn new<S: HeightSource>(evaluator: Arc<HealthEvaluator<S>>, config: &ListenerConfig) -> Self {
        let state = AppState { evaluator };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<S: HeightSource>(config: &ListenerConfig, state: AppState<S>) -> Router {
        Router::new()
            .route("/", get(greeting))
            .route("/status", get(status_handler::<S>))
            .route("/health", get(health_handler::<S>))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs))),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn greeting() -> String {
    format!("Validator health probe running on {}", hostname())
}

async fn status_handler<S: HeightSource>(State(state): State<AppState<S>>) -> ApiSuccess<Snapshot> {
    ApiSuccess::new(state.evaluator.status().await)
}

async fn health_handler<S: HeightSource>(
    State(state): State<AppState<S>>,
) -> Result<ApiSuccess<Snapshot>, HealthError> {
    state.evaluator.evaluate().await.map(ApiSuccess::new)
}

fn hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

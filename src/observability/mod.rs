//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (endpoint, url, heights)
//! - Request ID flows through the HTTP trace span
//! - Metrics are cheap and inert when the exporter is disabled

pub mod logging;
pub mod metrics;

//! Validator health probe library.
//!
//! Polls a local validator and trusted reference nodes for their chain
//! height and reports whether the local node is keeping up.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;

pub use config::ProbeConfig;
pub use health::{HealthError, HealthEvaluator};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

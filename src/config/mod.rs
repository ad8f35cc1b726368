//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or compiled defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProbeConfig (validated, immutable)
//!     → endpoint set, rpc client, evaluator built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the threshold override file is the
//!   only setting re-read while running (see `health::threshold`)
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::EndpointConfig;
pub use schema::HealthConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProbeConfig;
pub use schema::RpcConfig;

//! Upstream node client subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint URL
//!     → client.rs (JSON-RPC getEpochInfo with timeout)
//!     → types.rs (envelope decoding, error typing)
//!     → absolute slot, or sentinel 0 on any failure
//! ```

pub mod client;
pub mod types;

pub use client::{HeightSource, RpcClient};
pub use types::{EpochInfo, RpcError, SENTINEL_HEIGHT};

//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handler (/status or /health)
//!     → health::HealthEvaluator
//!     → response.rs (envelope, error → 500)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{error_response, ApiFailure, ApiSuccess};
pub use server::{AppState, HttpServer};

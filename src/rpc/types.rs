//! JSON-RPC wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Height reported when an endpoint could not be queried.
///
/// A genuine height of zero is indistinguishable from a failed fetch. Real
/// chains are always past slot zero, so the two are treated the same.
pub const SENTINEL_HEIGHT: u64 = 0;

/// Outgoing JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// Commitment parameter object.
#[derive(Debug, Clone, Serialize)]
pub struct CommitmentConfig<'a> {
    pub commitment: &'a str,
}

/// Incoming JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object returned by the node.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `getEpochInfo` result. `absolute_slot` is the height; other fields the
/// node sends are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EpochInfo {
    pub absolute_slot: u64,
    #[serde(default)]
    pub epoch: Option<u64>,
}

/// Errors that can occur while querying one endpoint.
///
/// These never leave the client: they are logged and turned into
/// [`SENTINEL_HEIGHT`].
#[derive(Debug, Error)]
pub enum RpcError {
    /// Connection, timeout, non-2xx status or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Node { code: i64, message: String },

    /// Neither `result` nor `error` was present.
    #[error("RPC response has no result")]
    MissingResult,
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

impl<T> RpcResponse<T> {
    /// Unwrap the envelope into the result or a typed error.
    pub fn into_result(self) -> RpcResult<T> {
        if let Some(err) = self.error {
            return Err(RpcError::Node {
                code: err.code,
                message: err.message,
            });
        }
        self.result.ok_or(RpcError::MissingResult)
    }
}

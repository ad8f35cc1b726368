//! Response envelopes and error translation.
//!
//! # Bodies
//! ```text
//! 200 {"status":"OK","result":{name: height, ...}}
//! 500 {"status":"Error","error":msg,"kind":kind,"traceback":diagnostic}
//! ```
//!
//! `error_response` is the only place a `HealthError` becomes HTTP.

use std::error::Error as _;
use std::fmt::Write as _;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::health::HealthError;

#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub status: &'static str,
    pub result: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(result: T) -> Self {
        Self {
            status: "OK",
            result,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub status: &'static str,
    pub error: String,
    pub kind: &'static str,
    pub traceback: String,
}

/// Translate an evaluation error into a status code and body.
pub fn error_response(err: &HealthError) -> (StatusCode, ApiFailure) {
    let body = ApiFailure {
        status: "Error",
        error: err.to_string(),
        kind: err.kind(),
        traceback: diagnostic(err),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// Error kind, message, source chain and debug form.
fn diagnostic(err: &HealthError) -> String {
    let mut out = format!("{}: {}", err.kind(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\ncaused by: {}", cause);
        source = cause.source();
    }
    let _ = write!(out, "\n{:?}", err);
    out
}

impl IntoResponse for HealthError {
    fn into_response(self) -> Response {
        let (status, body) = error_response(&self);
        (status, Json(body)).into_response()
    }
}

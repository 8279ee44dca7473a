//! Error types for the catalog proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Upstream Error Enum ==
/// Failure of a single request to the upstream catalog.
///
/// None of these are retried; they propagate unchanged through the cache
/// layer and are never stored.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status
    #[error("OpenLibrary error {status}")]
    Status { status: u16 },

    /// Response body was not valid JSON
    #[error("OpenLibrary returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request never produced a response (connect, DNS, reset, body read)
    #[error("OpenLibrary request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// == Proxy Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Caller supplied missing or unusable parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream catalog request failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Startup configuration could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, ProxyError>;

//! Error types for the host service shim
//!
//! All failure modes of the service clients are represented by one enum so
//! that callers can match on transport vs. service-level failures.

use thiserror::Error;

/// Errors surfaced by the service clients and operations
#[derive(Error, Debug)]
pub enum HostServiceError {
    /// HTTP transport failure (connect, timeout, TLS, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a failure envelope (`result: false`)
    #[error("API error {code}: {message}")]
    Api {
        /// Service-specific error code from the response envelope
        code: i64,
        /// Human-readable message from the response envelope
        message: String,
    },

    /// Response body could not be decoded into the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error (catch-all for unexpected failures)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

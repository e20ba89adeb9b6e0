//! Error types for HTTP transport operations.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong at the wire level. The API layer wraps every
/// variant except [`HttpError::InvalidUrl`] as a network failure; none of
/// them are retried by this crate.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and connections dropped mid-body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body exceeded the configured size cap.
    ///
    /// Reading stops as soon as the cap is crossed, so at most
    /// `limit` bytes (plus one chunk) are ever buffered.
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// The configured cap in bytes
        limit: usize,
    },
}

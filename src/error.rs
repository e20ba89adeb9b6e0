//! Typed API errors and the status-code classifier.
//!
//! Every failed call produces exactly one [`FirecrawlError`]. Non-2xx
//! responses are mapped by [`classify`], which picks the variant from the
//! status code alone and only uses the body to fill in the message.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::HttpError;

/// A field-level validation problem reported with a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Request field that failed validation
    pub field: String,
    /// Human-readable description
    pub message: String,
    /// Machine-readable error code
    pub code: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `false` on error responses
    #[serde(default)]
    pub success: bool,
    /// Short error message
    #[serde(default)]
    pub error: Option<String>,
    /// Optional free-text details
    #[serde(default)]
    pub details: Option<String>,
    /// Field-level validation errors (400 only)
    #[serde(default)]
    pub validation_errors: Option<Vec<ValidationIssue>>,
}

impl ErrorEnvelope {
    /// Parses an error body, returning `None` if it is not a valid envelope.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Combines `error` and `details` into a single message.
    fn message(&self) -> Option<String> {
        match (&self.error, &self.details) {
            (Some(error), Some(details)) => Some(format!("{error}: {details}")),
            (Some(error), None) => Some(error.clone()),
            (None, Some(details)) => Some(details.clone()),
            (None, None) => None,
        }
    }
}

/// Error type for Firecrawl API operations.
///
/// A closed set of failure kinds. Callers are expected to match on the
/// variant to decide how to react (re-authenticate, back off, fix input).
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// The request never produced a usable HTTP response.
    ///
    /// Covers connection failures, DNS and TLS errors, timeouts and
    /// responses whose body exceeded the size cap.
    #[error("Network error: {0}")]
    Network(#[source] HttpError),

    /// 401: the API key was missing or rejected.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Message from the error envelope
        message: String,
    },

    /// 402: the team is out of credits.
    #[error("Payment required: {message}")]
    PaymentRequired {
        /// Message from the error envelope
        message: String,
    },

    /// 429: too many requests.
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Message from the error envelope
        message: String,
    },

    /// 400: the request was rejected as invalid.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Message from the error envelope
        message: String,
        /// Field-level validation errors, possibly empty
        validation_errors: Vec<ValidationIssue>,
    },

    /// 404: the resource (usually a job id) does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Message from the error envelope
        message: String,
    },

    /// 5xx: the server failed to handle the request.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the error envelope
        message: String,
    },

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A 2xx response decoded but did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A 2xx response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Any other non-2xx status.
    #[error("Unexpected status {status}: {message}")]
    Unexpected {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        message: String,
    },

    /// A job did not reach a terminal status before the poll timeout.
    #[error("Job {job_id} did not finish within {}s", timeout.as_secs())]
    JobTimeout {
        /// Identifier of the job being polled
        job_id: String,
        /// The configured poll timeout
        timeout: Duration,
    },
}

impl From<HttpError> for FirecrawlError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidUrl(reason) => Self::InvalidUrl(reason),
            other => Self::Network(other),
        }
    }
}

impl FirecrawlError {
    /// Returns the HTTP status code behind this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::PaymentRequired { .. } => Some(402),
            Self::RateLimited { .. } => Some(429),
            Self::BadRequest { .. } => Some(400),
            Self::NotFound { .. } => Some(404),
            Self::Server { status, .. } | Self::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure is potentially transient.
    ///
    /// This crate never retries on its own; the hint is for callers that
    /// implement their own backoff.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } | Self::Server { .. } => true,
            Self::Unauthorized { .. }
            | Self::PaymentRequired { .. }
            | Self::BadRequest { .. }
            | Self::NotFound { .. }
            | Self::InvalidUrl(_)
            | Self::InvalidResponse(_)
            | Self::Decode(_)
            | Self::Encode(_)
            | Self::Unexpected { .. }
            | Self::JobTimeout { .. } => false,
        }
    }
}

/// Generic messages used when the error body is missing or unreadable.
mod fallback {
    pub const BAD_REQUEST: &str = "Bad request";
    pub const UNAUTHORIZED: &str = "Unauthorized: invalid or missing API key";
    pub const PAYMENT_REQUIRED: &str = "Payment required: insufficient credits";
    pub const NOT_FOUND: &str = "Resource not found";
    pub const RATE_LIMITED: &str = "Rate limit exceeded";
    pub const SERVER: &str = "Internal server error";
}

/// Maps a non-2xx response to a typed error.
///
/// The error body is decoded as an [`ErrorEnvelope`] when possible; a body
/// that fails to decode still yields the status-derived variant with a
/// generic message.
#[must_use]
pub fn classify(status: http::StatusCode, body: &[u8]) -> FirecrawlError {
    let envelope = ErrorEnvelope::parse(body);
    if envelope.is_none() && is_classified(status) {
        tracing::warn!(status = status.as_u16(), "Error body is not a valid error envelope");
    }
    classify_envelope(status, envelope, &String::from_utf8_lossy(body))
}

/// Pure classification from a status code and an already-decoded envelope.
///
/// `raw_body` is only used for statuses outside the policy table.
#[must_use]
pub fn classify_envelope(
    status: http::StatusCode,
    envelope: Option<ErrorEnvelope>,
    raw_body: &str,
) -> FirecrawlError {
    let message = |fallback: &str| {
        envelope
            .as_ref()
            .and_then(ErrorEnvelope::message)
            .unwrap_or_else(|| fallback.to_string())
    };

    match status.as_u16() {
        400 => FirecrawlError::BadRequest {
            message: message(fallback::BAD_REQUEST),
            validation_errors: envelope
                .as_ref()
                .and_then(|e| e.validation_errors.clone())
                .unwrap_or_default(),
        },
        401 => FirecrawlError::Unauthorized {
            message: message(fallback::UNAUTHORIZED),
        },
        402 => FirecrawlError::PaymentRequired {
            message: message(fallback::PAYMENT_REQUIRED),
        },
        404 => FirecrawlError::NotFound {
            message: message(fallback::NOT_FOUND),
        },
        429 => FirecrawlError::RateLimited {
            message: message(fallback::RATE_LIMITED),
        },
        code @ 500..=599 => FirecrawlError::Server {
            status: code,
            message: message(fallback::SERVER),
        },
        code => FirecrawlError::Unexpected {
            status: code,
            message: raw_body.to_string(),
        },
    }
}

const fn is_classified(status: http::StatusCode) -> bool {
    matches!(status.as_u16(), 400 | 401 | 402 | 404 | 429 | 500..=599)
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

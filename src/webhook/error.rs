//! Error types for webhook verification.

use thiserror::Error;

/// Why an inbound webhook was rejected.
///
/// A wrong digest and a digest of the wrong length produce the same
/// [`WebhookError::InvalidSignature`], so callers cannot tell them apart.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request carried no `X-Firecrawl-Signature` header.
    #[error("Missing signature header")]
    MissingSignature,

    /// The header is not `<algorithm>=<hex digest>` with a supported algorithm.
    #[error("Invalid signature format: {0}")]
    InvalidFormat(String),

    /// The digest does not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The body was authentic but is not a valid event envelope.
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

//! Verification of inbound webhook callbacks.
//!
//! The service signs every callback body with HMAC-SHA256 keyed by the
//! team's webhook secret and sends `X-Firecrawl-Signature: sha256=<hex>`.
//! All functions here are stateless; verify the raw bytes before decoding.

mod error;
mod event;
mod signature;

#[cfg(test)]
mod signature_tests;

pub use error::WebhookError;
pub use event::{WebhookEvent, WebhookEventType, parse_event};
pub use signature::{
    SIGNATURE_HEADER, SUPPORTED_ALGORITHM, WebhookSignature, compute_signature, constant_time_eq,
    verify_headers, verify_signature, verify_signature_str,
};

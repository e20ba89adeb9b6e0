//! HMAC-SHA256 signatures over raw webhook bodies.

use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature, lowercase as `http` normalizes names.
pub const SIGNATURE_HEADER: &str = "x-firecrawl-signature";

/// The only algorithm the service signs with.
pub const SUPPORTED_ALGORITHM: &str = "sha256";

/// A parsed `<algorithm>=<hex digest>` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSignature {
    /// Always [`SUPPORTED_ALGORITHM`] once parsed
    pub algorithm: String,
    /// Hex digest as sent; not validated as hex
    pub digest: String,
}

impl WebhookSignature {
    /// Parses a header value, splitting on the first `=` only.
    ///
    /// # Errors
    ///
    /// [`WebhookError::InvalidFormat`] when there is no `=` or the
    /// algorithm is not `sha256`.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let (algorithm, digest) = header.split_once('=').ok_or_else(|| {
            WebhookError::InvalidFormat("expected '<algorithm>=<hex digest>'".to_string())
        })?;

        if algorithm != SUPPORTED_ALGORITHM {
            return Err(WebhookError::InvalidFormat(format!(
                "unsupported algorithm '{algorithm}'"
            )));
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            digest: digest.to_string(),
        })
    }
}

impl FromStr for WebhookSignature {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Computes the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
#[must_use]
pub fn compute_signature(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two byte strings in time independent of where they differ.
///
/// Inputs of different length return `false` immediately.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    diff == 0
}

/// Verifies a signature header against the exact raw body.
///
/// Call this before decoding the body: any re-serialization changes the
/// bytes and breaks the digest.
///
/// # Errors
///
/// - [`WebhookError::InvalidFormat`] if the header cannot be parsed
/// - [`WebhookError::InvalidSignature`] if the digest does not match
///
/// # Example
///
/// ```
/// use firecrawl::webhook::{compute_signature, verify_signature};
///
/// let body = br#"{"type":"crawl.page"}"#;
/// let header = format!("sha256={}", compute_signature(body, "secret"));
///
/// assert!(verify_signature(body, &header, "secret").is_ok());
/// assert!(verify_signature(body, &header, "other").is_err());
/// ```
pub fn verify_signature(payload: &[u8], header: &str, secret: &str) -> Result<(), WebhookError> {
    let signature = WebhookSignature::parse(header)?;
    let expected = compute_signature(payload, secret);

    if constant_time_eq(signature.digest.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(WebhookError::InvalidSignature)
    }
}

/// [`verify_signature`] for a body already held as a string.
///
/// # Errors
///
/// As [`verify_signature`].
pub fn verify_signature_str(payload: &str, header: &str, secret: &str) -> Result<(), WebhookError> {
    verify_signature(payload.as_bytes(), header, secret)
}

/// Reads the signature header from `headers` and verifies `payload`.
///
/// # Errors
///
/// [`WebhookError::MissingSignature`] if the header is absent or empty,
/// otherwise as [`verify_signature`].
pub fn verify_headers(
    headers: &http::HeaderMap,
    payload: &[u8],
    secret: &str,
) -> Result<(), WebhookError> {
    let value = headers
        .get(SIGNATURE_HEADER)
        .ok_or(WebhookError::MissingSignature)?;
    let header = value
        .to_str()
        .map_err(|_| WebhookError::InvalidFormat("header is not visible ASCII".to_string()))?;

    if header.trim().is_empty() {
        return Err(WebhookError::MissingSignature);
    }

    verify_signature(payload, header.trim(), secret)
}

//! Webhook event envelope.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{WebhookError, verify_headers};
use crate::types::JsonValue;

/// Kind of job event delivered to a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "crawl.started")]
    CrawlStarted,
    #[serde(rename = "crawl.page")]
    CrawlPage,
    #[serde(rename = "crawl.completed")]
    CrawlCompleted,
    #[serde(rename = "crawl.failed")]
    CrawlFailed,
    #[serde(rename = "batch_scrape.started")]
    BatchScrapeStarted,
    #[serde(rename = "batch_scrape.page")]
    BatchScrapePage,
    #[serde(rename = "batch_scrape.completed")]
    BatchScrapeCompleted,
    #[serde(rename = "batch_scrape.failed")]
    BatchScrapeFailed,
    #[serde(rename = "extract.started")]
    ExtractStarted,
    #[serde(rename = "extract.completed")]
    ExtractCompleted,
    #[serde(rename = "extract.failed")]
    ExtractFailed,
    /// An event type this crate does not know yet
    #[serde(other)]
    Unknown,
}

impl WebhookEventType {
    /// Returns true for `completed` and `failed` events.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::CrawlCompleted
                | Self::CrawlFailed
                | Self::BatchScrapeCompleted
                | Self::BatchScrapeFailed
                | Self::ExtractCompleted
                | Self::ExtractFailed
        )
    }

    /// Returns true for per-page events.
    #[must_use]
    pub const fn is_page(self) -> bool {
        matches!(self, Self::CrawlPage | Self::BatchScrapePage)
    }
}

/// A decoded webhook callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    /// Job id the event belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event payload; documents for page events
    #[serde(default)]
    pub data: JsonValue,
    /// Metadata registered with the webhook, echoed back
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookEvent {
    /// Decodes `data` into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `data` does not have the shape of `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        self.data.decode()
    }
}

/// Verifies a callback and decodes its body.
///
/// The signature is checked over the raw bytes first; the body is only
/// parsed once it is known to be authentic.
///
/// # Errors
///
/// Any verification error from [`verify_headers`], or
/// [`WebhookError::InvalidPayload`] if the body is not an event envelope.
pub fn parse_event(
    headers: &http::HeaderMap,
    payload: &[u8],
    secret: &str,
) -> Result<WebhookEvent, WebhookError> {
    verify_headers(headers, payload, secret)?;
    serde_json::from_slice(payload).map_err(WebhookError::InvalidPayload)
}

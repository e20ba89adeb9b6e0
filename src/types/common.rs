//! Envelopes and option types shared by several endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::JsonValue;
use crate::jobs::JobStatus;

/// The `{success, data}` wrapper most synchronous endpoints respond with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// Whether the request succeeded
    #[serde(default)]
    pub success: bool,
    /// The payload
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Non-fatal warning from the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Error message when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to a request that starts an asynchronous job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStarted {
    /// Whether the job was accepted
    #[serde(default)]
    pub success: bool,
    /// Job identifier used for status checks
    pub id: String,
    /// Status URL for the job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// URLs the server refused to process
    #[serde(
        rename = "invalidURLs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub invalid_urls: Option<Vec<String>>,
}

/// Response to a cancel request.
///
/// Crawl and batch jobs answer with `{"status": "cancelled"}`, extract jobs
/// with `{"success": true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOutcome {
    /// Success flag, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// New job status, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

impl CancelOutcome {
    /// Returns true if the server confirmed the cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == Some(JobStatus::Cancelled) || self.success == Some(true)
    }
}

/// Job lifecycle events a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookSubscription {
    /// The job started
    Started,
    /// A page finished scraping
    Page,
    /// The job completed
    Completed,
    /// The job failed
    Failed,
}

/// Webhook registration attached to a crawl, batch scrape or extract job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Callback URL
    pub url: String,
    /// Extra headers the server sends with each callback
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Metadata echoed back in every event
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, JsonValue>,
    /// Events to deliver; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<WebhookSubscription>,
}

impl WebhookConfig {
    /// Creates a webhook registration for all events.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Geographic hint for scrapes and searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// ISO 3166-1 alpha-2 country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Preferred languages, most preferred first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

/// Limits applied when following `next` links of paginated job results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Follow `next` links at all
    pub auto_paginate: bool,
    /// Maximum number of additional pages to fetch
    pub max_pages: Option<u32>,
    /// Stop once this many documents have been collected
    pub max_results: Option<usize>,
}

impl PaginationConfig {
    /// Page cap used by [`Default`] and the start-and-wait helpers.
    pub const DEFAULT_MAX_PAGES: u32 = 1_000;

    /// Fetch only the first page.
    pub const SINGLE_PAGE: Self = Self {
        auto_paginate: false,
        max_pages: None,
        max_results: None,
    };
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            auto_paginate: true,
            max_pages: Some(Self::DEFAULT_MAX_PAGES),
            max_results: None,
        }
    }
}

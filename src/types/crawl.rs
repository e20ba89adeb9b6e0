//! Crawl job requests, status snapshots and error reports.

use serde::{Deserialize, Serialize};

use super::{Document, JsonValue, ScrapeOptions, WebhookConfig};
use crate::jobs::{JobSnapshot, JobStatus};

/// How the crawler treats the site's sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapMode {
    /// Use the sitemap alongside link discovery
    Include,
    /// Ignore the sitemap
    Skip,
    /// Only use URLs from the sitemap (map endpoint only)
    Only,
}

/// Crawl settings shared by the crawl request and the params preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Natural-language description the server turns into crawl settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discovery_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<SitemapMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_query_parameters: Option<bool>,
    /// Maximum number of pages to crawl
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_entire_domain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_external_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_subdomains: Option<bool>,
    /// Delay between scrapes in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    /// Passed through to the server; not enforced locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<u32>,
}

/// Body of `POST /v2/crawl`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    /// Starting URL
    pub url: String,
    #[serde(flatten)]
    pub options: CrawlOptions,
    /// Options applied to every crawled page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_data_retention: Option<bool>,
}

impl CrawlRequest {
    /// Crawl from `url` with server defaults.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Limits the number of crawled pages.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Sets per-page scrape options.
    #[must_use]
    pub fn with_scrape_options(mut self, options: ScrapeOptions) -> Self {
        self.scrape_options = Some(options);
        self
    }

    /// Registers a webhook for job events.
    #[must_use]
    pub fn with_webhook(mut self, webhook: WebhookConfig) -> Self {
        self.webhook = Some(webhook);
        self
    }
}

/// Status snapshot of a crawl or batch scrape job.
///
/// Large results are paginated: `next` points at the following page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlJob {
    pub status: JobStatus,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// URL of the next result page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default)]
    pub data: Vec<Document>,
}

impl JobSnapshot for CrawlJob {
    fn status(&self) -> JobStatus {
        self.status
    }

    fn progress(&self) -> Option<(u64, u64)> {
        Some((self.completed, self.total))
    }
}

/// One page that failed during a crawl or batch scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlErrorEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub url: String,
    pub error: String,
}

/// Response of the `/errors` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlErrors {
    #[serde(default)]
    pub errors: Vec<CrawlErrorEntry>,
    /// URLs skipped because robots.txt disallowed them
    #[serde(default)]
    pub robots_blocked: Vec<String>,
}

/// A crawl currently running for the team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCrawl {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<JsonValue>,
}

/// Response of `GET /v2/crawl/active`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveCrawls {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub crawls: Vec<ActiveCrawl>,
}

/// Body of `POST /v2/crawl/params-preview`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlParamsRequest {
    pub url: String,
    /// Natural-language crawl description to translate into settings
    pub prompt: String,
}

/// Crawl settings the server derived from a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlParamsPreview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub options: CrawlOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

//! Batch scrape requests.
//!
//! Batch jobs report status and errors in the same shape as crawls, see
//! [`BatchScrapeJob`] and [`CrawlErrors`](super::CrawlErrors).

use serde::{Deserialize, Serialize};

use super::{CrawlJob, ScrapeOptions, WebhookConfig};

/// Status snapshot of a batch scrape job.
pub type BatchScrapeJob = CrawlJob;

/// Body of `POST /v2/batch/scrape`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchScrapeRequest {
    /// Pages to scrape
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub options: ScrapeOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookConfig>,
    /// Passed through to the server; not enforced locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<u32>,
    /// Skip invalid URLs instead of rejecting the whole batch
    #[serde(
        rename = "ignoreInvalidURLs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ignore_invalid_urls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_data_retention: Option<bool>,
}

impl BatchScrapeRequest {
    /// Scrape `urls` with server defaults.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replaces the per-page scrape options.
    #[must_use]
    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimpleFormat;

    #[test]
    fn request_flattens_scrape_options() {
        let request = BatchScrapeRequest {
            ignore_invalid_urls: Some(true),
            max_concurrency: Some(3),
            ..BatchScrapeRequest::new(["https://a.example", "https://b.example"])
                .with_options(ScrapeOptions::with_formats([SimpleFormat::Links]))
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "urls": ["https://a.example", "https://b.example"],
                "formats": ["links"],
                "maxConcurrency": 3,
                "ignoreInvalidURLs": true
            })
        );
    }
}

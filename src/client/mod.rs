//! Authenticated client for the Firecrawl v2 API.
//!
//! [`FirecrawlClient`] owns the transport, the base URL and the default
//! headers. It holds no per-call state: clones share one transport and any
//! number of calls may run concurrently.

mod builder;
mod endpoints;
mod executor;


use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use url::Url;

pub use builder::{BuildError, ClientBuilder};

use crate::error::FirecrawlError;
use crate::jobs::{JobPoller, PollPolicy};
use crate::time::TokioSleeper;
use crate::transport::ReqwestClient;

/// Client for the Firecrawl v2 API.
///
/// # Type Parameters
///
/// - `H`: The HTTP transport (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used while waiting for jobs (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use firecrawl::FirecrawlClient;
/// use firecrawl::types::ScrapeRequest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FirecrawlClient::new("fc-your-key")?;
/// let document = client.scrape(&ScrapeRequest::new("https://example.com")).await?;
/// println!("{}", document.markdown.unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct FirecrawlClient<H = ReqwestClient, S = TokioSleeper> {
    http: Arc<H>,
    base_url: Url,
    headers: HeaderMap,
    timeout: Duration,
    poller: JobPoller<S>,
}

impl FirecrawlClient {
    /// Creates a client for the hosted API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the key is empty or not header-safe.
    pub fn new(api_key: impl Into<String>) -> Result<Self, BuildError> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Returns a builder for custom configuration.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<H, S> FirecrawlClient<H, S> {
    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the policy used by the waiting helpers.
    #[must_use]
    pub const fn poll_policy(&self) -> &PollPolicy {
        self.poller.policy()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &H {
        &self.http
    }

    /// Replaces the poll policy, keeping the sleeper.
    #[must_use]
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poller = self.poller.with_policy(policy);
        self
    }

    /// Replaces the poller used by the waiting helpers.
    ///
    /// Tests can pass a poller built with
    /// [`InstantSleeper`](crate::time::InstantSleeper) to skip the delays.
    #[must_use]
    pub fn with_poller<S2>(self, poller: JobPoller<S2>) -> FirecrawlClient<H, S2> {
        FirecrawlClient {
            http: self.http,
            base_url: self.base_url,
            headers: self.headers,
            timeout: self.timeout,
            poller,
        }
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, FirecrawlError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FirecrawlError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds the URL of a job resource, e.g. `/v2/crawl/{id}/errors`.
    pub(crate) fn job_endpoint(
        &self,
        prefix: &[&str],
        id: &str,
        suffix: Option<&str>,
    ) -> Result<Url, FirecrawlError> {
        validate_job_id(id)?;
        let mut segments = prefix.to_vec();
        segments.push(id);
        segments.extend(suffix);
        self.endpoint(&segments)
    }
}

impl<H, S: Clone> Clone for FirecrawlClient<H, S> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout,
            poller: self.poller.clone(),
        }
    }
}

impl<H, S> fmt::Debug for FirecrawlClient<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirecrawlClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("poll_policy", self.poller.policy())
            .finish_non_exhaustive()
    }
}

/// Rejects ids that cannot name a single path segment.
fn validate_job_id(id: &str) -> Result<(), FirecrawlError> {
    if id.trim().is_empty() {
        return Err(FirecrawlError::InvalidUrl("job id is empty".to_string()));
    }
    if id == "." || id == ".." {
        return Err(FirecrawlError::InvalidUrl(format!("invalid job id '{id}'")));
    }
    Ok(())
}

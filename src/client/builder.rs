//! Client construction.

use std::sync::Arc;
use std::time::Duration;

use http::header::{self, HeaderMap, HeaderValue};
use thiserror::Error;
use url::Url;

use super::FirecrawlClient;
use crate::jobs::{JobPoller, PollPolicy};
use crate::transport::{HttpClient, ReqwestClient};

/// Error returned when a [`ClientBuilder`] cannot produce a client.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No API key was configured, or it was empty.
    #[error("An API key is required")]
    MissingApiKey,

    /// The API key cannot be sent as an HTTP header value.
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,

    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The user agent cannot be sent as an HTTP header value.
    #[error("User agent contains characters that are not valid in an HTTP header")]
    InvalidUserAgent,
}

/// Builder for [`FirecrawlClient`].
///
/// # Defaults
///
/// - `base_url`: `https://api.firecrawl.dev`
/// - `timeout`: 30 seconds per request
/// - `max_body_bytes`: 10 MiB
/// - `user_agent`: `firecrawl-rs/<version>`
/// - `poll_policy`: [`PollPolicy::default`]
///
/// # Example
///
/// ```
/// use firecrawl::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::new()
///     .api_key("fc-your-key")
///     .base_url("http://localhost:3002/")
///     .timeout(Duration::from_secs(60))
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url().as_str(), "http://localhost:3002/");
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    max_body_bytes: usize,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
    poll_policy: PollPolicy,
}

impl ClientBuilder {
    /// Default API location.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.firecrawl.dev";

    /// Default per-request timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a builder with default settings and no API key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_body_bytes: ReqwestClient::DEFAULT_MAX_BODY_BYTES,
            user_agent: None,
            http_client: None,
            poll_policy: PollPolicy::default(),
        }
    }

    /// Sets the API key sent as a bearer token.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API location. A trailing slash is ignored.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the response body cap.
    ///
    /// Only applies to the reqwest transport created by [`build`](Self::build).
    #[must_use]
    pub const fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Reuses an existing reqwest client and its connection pool.
    ///
    /// The client stays owned by the caller; it is never shut down here.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the interval and timeout used by the waiting helpers.
    #[must_use]
    pub const fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Builds a client backed by reqwest.
    ///
    /// # Errors
    ///
    /// See [`BuildError`].
    pub fn build(mut self) -> Result<FirecrawlClient, BuildError> {
        let client = self.http_client.take().unwrap_or_default();
        let transport = ReqwestClient::from_client(client).with_max_body_bytes(self.max_body_bytes);
        self.build_with(transport)
    }

    /// Builds a client on top of a custom [`HttpClient`].
    ///
    /// # Errors
    ///
    /// See [`BuildError`].
    pub fn build_with<H: HttpClient>(self, http: H) -> Result<FirecrawlClient<H>, BuildError> {
        let base_url = parse_base_url(&self.base_url)?;
        let headers = self.default_headers()?;

        Ok(FirecrawlClient {
            http: Arc::new(http),
            base_url,
            headers,
            timeout: self.timeout,
            poller: JobPoller::new(self.poll_policy),
        })
    }

    fn default_headers(&self) -> Result<HeaderMap, BuildError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(BuildError::MissingApiKey)?;

        let mut authorization = HeaderValue::try_from(format!("Bearer {api_key}"))
            .map_err(|_| BuildError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        let user_agent = match &self.user_agent {
            Some(agent) => {
                HeaderValue::try_from(agent.as_str()).map_err(|_| BuildError::InvalidUserAgent)?
            }
            None => HeaderValue::from_static(DEFAULT_USER_AGENT),
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::USER_AGENT, user_agent);
        Ok(headers)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const DEFAULT_USER_AGENT: &str = concat!("firecrawl-rs/", env!("CARGO_PKG_VERSION"));

fn parse_base_url(raw: &str) -> Result<Url, BuildError> {
    let invalid = |reason: &str| BuildError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("URL must not carry a query or fragment"));
    }

    Ok(url)
}

//! One method per API endpoint, plus the start-and-wait helpers.

use std::collections::HashSet;

use url::Url;

use super::FirecrawlClient;
use crate::error::FirecrawlError;
use crate::time::Sleeper;
use crate::transport::HttpClient;
use crate::types::{
    ActiveCrawls, BatchScrapeJob, BatchScrapeRequest, CancelOutcome, CrawlErrors, CrawlJob,
    CrawlParamsPreview, CrawlParamsRequest, CrawlRequest, CreditUsage, CreditUsageHistory,
    Document, ExtractJob, ExtractRequest, JobStarted, MapRequest, MapResponse, PaginationConfig,
    QueueStatus, ScrapeRequest, SearchData, SearchRequest, TokenUsage, TokenUsageHistory,
};

const CRAWL: &[&str] = &["v2", "crawl"];
const BATCH_SCRAPE: &[&str] = &["v2", "batch", "scrape"];
const EXTRACT: &[&str] = &["v2", "extract"];

impl<H: HttpClient, S> FirecrawlClient<H, S> {
    /// Scrapes a single page.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<Document, FirecrawlError> {
        let url = self.endpoint(&["v2", "scrape"])?;
        self.execute_data(http::Method::POST, url, Some(request))
            .await
    }

    /// Lists the URLs of a site.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn map(&self, request: &MapRequest) -> Result<MapResponse, FirecrawlError> {
        let url = self.endpoint(&["v2", "map"])?;
        self.post(url, request).await
    }

    /// Runs a web search, optionally scraping the hits.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchData, FirecrawlError> {
        let url = self.endpoint(&["v2", "search"])?;
        self.execute_data(http::Method::POST, url, Some(request))
            .await
    }

    // Crawl

    /// Starts a crawl job and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn start_crawl(&self, request: &CrawlRequest) -> Result<JobStarted, FirecrawlError> {
        let url = self.endpoint(CRAWL)?;
        self.post(url, request).await
    }

    /// Fetches the first page of a crawl's status.
    ///
    /// # Errors
    ///
    /// [`FirecrawlError::InvalidUrl`] for an empty id, otherwise transport,
    /// status or decode failures.
    pub async fn get_crawl_status(&self, id: &str) -> Result<CrawlJob, FirecrawlError> {
        let url = self.job_endpoint(CRAWL, id, None)?;
        self.get(url).await
    }

    /// Fetches a crawl's status and follows `next` links per `pagination`.
    ///
    /// # Errors
    ///
    /// As [`get_crawl_status`](Self::get_crawl_status), plus
    /// [`FirecrawlError::InvalidResponse`] if a `next` link leaves the API
    /// origin or repeats.
    pub async fn get_crawl_status_with(
        &self,
        id: &str,
        pagination: PaginationConfig,
    ) -> Result<CrawlJob, FirecrawlError> {
        let first = self.get_crawl_status(id).await?;
        self.collect_pages(first, pagination).await
    }

    /// Asks the server to stop a crawl.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn cancel_crawl(&self, id: &str) -> Result<CancelOutcome, FirecrawlError> {
        let url = self.job_endpoint(CRAWL, id, None)?;
        self.cancel(url).await
    }

    /// Lists pages that failed during a crawl.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_crawl_errors(&self, id: &str) -> Result<CrawlErrors, FirecrawlError> {
        let url = self.job_endpoint(CRAWL, id, Some("errors"))?;
        self.get(url).await
    }

    /// Lists the team's running crawls.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_active_crawls(&self) -> Result<ActiveCrawls, FirecrawlError> {
        let url = self.endpoint(&["v2", "crawl", "active"])?;
        self.get(url).await
    }

    /// Shows the crawl settings the server would derive from a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn crawl_params_preview(
        &self,
        request: &CrawlParamsRequest,
    ) -> Result<CrawlParamsPreview, FirecrawlError> {
        let url = self.endpoint(&["v2", "crawl", "params-preview"])?;
        self.execute_data(http::Method::POST, url, Some(request))
            .await
    }

    // Batch scrape

    /// Starts a batch scrape job and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn start_batch_scrape(
        &self,
        request: &BatchScrapeRequest,
    ) -> Result<JobStarted, FirecrawlError> {
        let url = self.endpoint(BATCH_SCRAPE)?;
        self.post(url, request).await
    }

    /// Fetches the first page of a batch scrape's status.
    ///
    /// # Errors
    ///
    /// [`FirecrawlError::InvalidUrl`] for an empty id, otherwise transport,
    /// status or decode failures.
    pub async fn get_batch_scrape_status(
        &self,
        id: &str,
    ) -> Result<BatchScrapeJob, FirecrawlError> {
        let url = self.job_endpoint(BATCH_SCRAPE, id, None)?;
        self.get(url).await
    }

    /// Fetches a batch scrape's status and follows `next` links per
    /// `pagination`.
    ///
    /// # Errors
    ///
    /// As [`get_crawl_status_with`](Self::get_crawl_status_with).
    pub async fn get_batch_scrape_status_with(
        &self,
        id: &str,
        pagination: PaginationConfig,
    ) -> Result<BatchScrapeJob, FirecrawlError> {
        let first = self.get_batch_scrape_status(id).await?;
        self.collect_pages(first, pagination).await
    }

    /// Asks the server to stop a batch scrape.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn cancel_batch_scrape(&self, id: &str) -> Result<CancelOutcome, FirecrawlError> {
        let url = self.job_endpoint(BATCH_SCRAPE, id, None)?;
        self.cancel(url).await
    }

    /// Lists pages that failed during a batch scrape.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_batch_scrape_errors(&self, id: &str) -> Result<CrawlErrors, FirecrawlError> {
        let url = self.job_endpoint(BATCH_SCRAPE, id, Some("errors"))?;
        self.get(url).await
    }

    // Extract

    /// Starts an extract job and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn start_extract(
        &self,
        request: &ExtractRequest,
    ) -> Result<JobStarted, FirecrawlError> {
        let url = self.endpoint(EXTRACT)?;
        self.post(url, request).await
    }

    /// Fetches an extract job's status.
    ///
    /// # Errors
    ///
    /// [`FirecrawlError::InvalidUrl`] for an empty id, otherwise transport,
    /// status or decode failures.
    pub async fn get_extract_status(&self, id: &str) -> Result<ExtractJob, FirecrawlError> {
        let url = self.job_endpoint(EXTRACT, id, None)?;
        self.get(url).await
    }

    /// Asks the server to stop an extract job.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn cancel_extract(&self, id: &str) -> Result<CancelOutcome, FirecrawlError> {
        let url = self.job_endpoint(EXTRACT, id, None)?;
        self.cancel(url).await
    }

    // Team

    /// Remaining credits for the current billing period.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_credit_usage(&self) -> Result<CreditUsage, FirecrawlError> {
        let url = self.endpoint(&["v2", "team", "credit-usage"])?;
        self.execute_data::<(), _>(http::Method::GET, url, None)
            .await
    }

    /// Credits used per billing period.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_credit_usage_historical(
        &self,
        by_api_key: bool,
    ) -> Result<CreditUsageHistory, FirecrawlError> {
        let url = self.historical_endpoint("credit-usage", by_api_key)?;
        self.get(url).await
    }

    /// Remaining extraction tokens for the current billing period.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_token_usage(&self) -> Result<TokenUsage, FirecrawlError> {
        let url = self.endpoint(&["v2", "team", "token-usage"])?;
        self.execute_data::<(), _>(http::Method::GET, url, None)
            .await
    }

    /// Tokens used per billing period.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_token_usage_historical(
        &self,
        by_api_key: bool,
    ) -> Result<TokenUsageHistory, FirecrawlError> {
        let url = self.historical_endpoint("token-usage", by_api_key)?;
        self.get(url).await
    }

    /// Queue depth and concurrency for the team.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError`] on transport, status or decode failures.
    pub async fn get_queue_status(&self) -> Result<QueueStatus, FirecrawlError> {
        let url = self.endpoint(&["v2", "team", "queue-status"])?;
        self.get(url).await
    }

    fn historical_endpoint(
        &self,
        resource: &str,
        by_api_key: bool,
    ) -> Result<Url, FirecrawlError> {
        let mut url = self.endpoint(&["v2", "team", resource, "historical"])?;
        if by_api_key {
            url.query_pairs_mut().append_pair("byApiKey", "true");
        }
        Ok(url)
    }

    /// Sends a cancel; a 2xx that reports nothing counts as confirmed.
    async fn cancel(&self, url: Url) -> Result<CancelOutcome, FirecrawlError> {
        let outcome: CancelOutcome = self.delete(url).await?;
        if outcome == CancelOutcome::default() {
            return Ok(CancelOutcome {
                success: Some(true),
                status: None,
            });
        }
        Ok(outcome)
    }

    /// Follows `next` links from `job`, appending each page's documents.
    ///
    /// Stops when there is no `next` link or a `pagination` limit is hit;
    /// in the latter case the returned snapshot keeps the unread `next`.
    /// A link that was already fetched is an invalid response.
    async fn collect_pages(
        &self,
        mut job: CrawlJob,
        pagination: PaginationConfig,
    ) -> Result<CrawlJob, FirecrawlError> {
        let mut visited: HashSet<Url> = HashSet::new();
        let mut pages: u32 = 0;

        while pagination.auto_paginate {
            let Some(next) = job.next.as_deref() else {
                break;
            };
            if pagination.max_pages.is_some_and(|max| pages >= max)
                || pagination.max_results.is_some_and(|max| job.data.len() >= max)
            {
                break;
            }

            let url = self.same_origin(next)?;
            if !visited.insert(url.clone()) {
                return Err(FirecrawlError::InvalidResponse(format!(
                    "next link {url} was already fetched"
                )));
            }
            let page: CrawlJob = self.get(url).await?;
            pages += 1;
            tracing::debug!(
                page = pages,
                documents = page.data.len(),
                "Fetched result page"
            );

            job.data.extend(page.data);
            job.next = page.next;
        }

        if let Some(max) = pagination.max_results {
            job.data.truncate(max);
        }
        Ok(job)
    }

    /// Parses a server-provided link and checks it points at the API.
    fn same_origin(&self, link: &str) -> Result<Url, FirecrawlError> {
        let url = Url::parse(link)
            .map_err(|e| FirecrawlError::InvalidResponse(format!("invalid next link: {e}")))?;
        if url.origin() != self.base_url.origin() {
            return Err(FirecrawlError::InvalidResponse(format!(
                "next link {link} is not on {}",
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }
}

impl<H: HttpClient, S: Sleeper> FirecrawlClient<H, S> {
    /// Starts a crawl and waits for it to finish.
    ///
    /// Result pages of a completed crawl are collected, up to
    /// [`PaginationConfig::DEFAULT_MAX_PAGES`].
    ///
    /// # Errors
    ///
    /// Any error from starting or polling, or
    /// [`FirecrawlError::JobTimeout`] once the poll policy timeout elapses.
    pub async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlJob, FirecrawlError> {
        let started = self.start_crawl(request).await?;
        let job = self
            .poller
            .wait(&started.id, || self.get_crawl_status(&started.id))
            .await?;
        self.collect_pages(job, PaginationConfig::default()).await
    }

    /// Starts a batch scrape and waits for it to finish.
    ///
    /// # Errors
    ///
    /// As [`crawl`](Self::crawl).
    pub async fn batch_scrape(
        &self,
        request: &BatchScrapeRequest,
    ) -> Result<BatchScrapeJob, FirecrawlError> {
        let started = self.start_batch_scrape(request).await?;
        let job = self
            .poller
            .wait(&started.id, || self.get_batch_scrape_status(&started.id))
            .await?;
        self.collect_pages(job, PaginationConfig::default()).await
    }

    /// Starts an extract job and waits for it to finish.
    ///
    /// # Errors
    ///
    /// As [`crawl`](Self::crawl).
    pub async fn extract(&self, request: &ExtractRequest) -> Result<ExtractJob, FirecrawlError> {
        let started = self.start_extract(request).await?;
        self.poller
            .wait(&started.id, || self.get_extract_status(&started.id))
            .await
    }
}

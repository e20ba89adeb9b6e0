//! Firecrawl API client
//!
//! A library for scraping, crawling, mapping, searching and extracting web
//! content through the Firecrawl v2 API, with job polling and webhook
//! signature verification.
//!
//! ```no_run
//! use firecrawl::FirecrawlClient;
//! use firecrawl::types::ScrapeRequest;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FirecrawlClient::new("fc-your-key")?;
//! let document = client.scrape(&ScrapeRequest::new("https://example.com")).await?;
//! println!("{}", document.markdown.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod jobs;
pub mod time;
pub mod transport;
pub mod types;
pub mod webhook;

pub use client::{BuildError, ClientBuilder, FirecrawlClient};
pub use error::FirecrawlError;

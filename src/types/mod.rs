//! Request and response types for the v2 API.
//!
//! Field names follow the wire format (`camelCase`); optional fields that
//! are unset are omitted from request bodies so the server applies its own
//! defaults.

mod batch;
mod common;
mod crawl;
mod extract;
mod json;
mod map;
mod schema;
mod scrape;
mod search;
mod team;

pub use batch::{BatchScrapeJob, BatchScrapeRequest};
pub use common::{
    CancelOutcome, DataEnvelope, JobStarted, Location, PaginationConfig, WebhookConfig,
    WebhookSubscription,
};
pub use crawl::{
    ActiveCrawl, ActiveCrawls, CrawlErrorEntry, CrawlErrors, CrawlJob, CrawlOptions,
    CrawlParamsPreview, CrawlParamsRequest, CrawlRequest, SitemapMode,
};
pub use extract::{ExtractJob, ExtractRequest};
pub use json::JsonValue;
pub use map::{MapLink, MapRequest, MapResponse};
pub use schema::SchemaProperty;
pub use scrape::{
    Action, Document, DocumentMetadata, Format, FormatOptions, ScrapeOptions, ScrapeRequest,
    SimpleFormat,
};
pub use search::{ImageHit, NewsHit, SearchData, SearchHit, SearchRequest, SearchSource};
pub use team::{
    CreditUsage, CreditUsageHistory, CreditUsagePeriod, QueueStatus, TokenUsage,
    TokenUsageHistory, TokenUsagePeriod,
};

//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with global options and one
//! subcommand per API operation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::{SearchSource, SimpleFormat};

/// Firecrawl command-line client
///
/// Scrapes, crawls, maps, searches and extracts web content through the
/// Firecrawl API and prints the results as JSON.
#[derive(Debug, Parser)]
#[command(name = "firecrawl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API key (falls back to the `FIRECRAWL_API_KEY` environment variable)
    #[arg(long = "api-key", env = "FIRECRAWL_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API base URL, e.g. a self-hosted instance
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum accepted response body size in bytes
    #[arg(long = "max-body-bytes", global = true)]
    pub max_body_bytes: Option<usize>,

    /// Seconds between job status checks
    #[arg(long = "poll-interval", global = true)]
    pub poll_interval: Option<u64>,

    /// Seconds to wait for a job before giving up
    #[arg(long = "poll-timeout", global = true)]
    pub poll_timeout: Option<u64>,

    /// Webhook signing secret (falls back to `FIRECRAWL_WEBHOOK_SECRET`)
    #[arg(
        long = "webhook-secret",
        env = "FIRECRAWL_WEBHOOK_SECRET",
        hide_env_values = true,
        global = true
    )]
    pub webhook_secret: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for firecrawl
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape a single page
    Scrape {
        /// Page to scrape
        url: String,
        /// Output format (can be specified multiple times; default: markdown)
        #[arg(long = "format", short, value_enum)]
        formats: Vec<FormatArg>,
        /// Strip navigation, headers and footers
        #[arg(long = "only-main-content")]
        only_main_content: bool,
        /// Extra delay before capture, in milliseconds
        #[arg(long = "wait-for", value_name = "MS")]
        wait_for: Option<u64>,
    },

    /// Crawl a site starting from a URL
    Crawl {
        /// Start URL
        url: String,
        /// Maximum number of pages
        #[arg(long)]
        limit: Option<u32>,
        /// Print the job id instead of waiting for completion
        #[arg(long = "no-wait")]
        no_wait: bool,
    },

    /// List the URLs of a site
    Map {
        /// Site to map
        url: String,
        /// Rank links by relevance to this query
        #[arg(long)]
        search: Option<String>,
        /// Maximum number of links
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Search the web
    Search {
        /// Search query
        query: String,
        /// Maximum number of results per source
        #[arg(long)]
        limit: Option<u32>,
        /// Source to search (can be specified multiple times; default: web)
        #[arg(long = "source", value_enum)]
        sources: Vec<SourceArg>,
    },

    /// Extract structured data from pages with an LLM
    Extract {
        /// Pages to extract from; glob patterns are allowed
        #[arg(required = true)]
        urls: Vec<String>,
        /// What to extract
        #[arg(long, short)]
        prompt: String,
        /// JSON schema file describing the result
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Print the job id instead of waiting for completion
        #[arg(long = "no-wait")]
        no_wait: bool,
    },

    /// Scrape many pages as one job
    Batch {
        /// Pages to scrape
        #[arg(required = true)]
        urls: Vec<String>,
        /// Output format (can be specified multiple times; default: markdown)
        #[arg(long = "format", short, value_enum)]
        formats: Vec<FormatArg>,
        /// Print the job id instead of waiting for completion
        #[arg(long = "no-wait")]
        no_wait: bool,
    },

    /// Show the status of a job
    Status {
        /// Kind of job
        #[arg(value_enum)]
        kind: JobKindArg,
        /// Job id
        id: String,
    },

    /// Cancel a running job
    Cancel {
        /// Kind of job
        #[arg(value_enum)]
        kind: JobKindArg,
        /// Job id
        id: String,
    },

    /// Show remaining credits
    Credits {
        /// Show usage per billing period
        #[arg(long)]
        historical: bool,
        /// Break historical usage down by API key
        #[arg(long = "by-api-key", requires = "historical")]
        by_api_key: bool,
    },

    /// Show remaining extraction tokens
    Tokens {
        /// Show usage per billing period
        #[arg(long)]
        historical: bool,
        /// Break historical usage down by API key
        #[arg(long = "by-api-key", requires = "historical")]
        by_api_key: bool,
    },

    /// Show queue depth and concurrency for the team
    Queue,

    /// Verify a webhook body against its signature header
    VerifyWebhook {
        /// File holding the raw body, or `-` for stdin
        #[arg(long)]
        body: PathBuf,
        /// Value of the `X-Firecrawl-Signature` header
        #[arg(long)]
        signature: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path (default: the platform config directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Returns true if the command talks to the API and needs a key.
    #[must_use]
    pub const fn requires_api_key(&self) -> bool {
        !matches!(self, Self::VerifyWebhook { .. } | Self::Init { .. })
    }
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Cleaned markdown
    Markdown,
    /// Cleaned HTML
    Html,
    /// Unmodified page HTML
    RawHtml,
    /// Links found on the page
    Links,
    /// Image URLs found on the page
    Images,
    /// LLM-generated summary
    Summary,
    /// Viewport screenshot URL
    Screenshot,
}

impl From<FormatArg> for SimpleFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => Self::Markdown,
            FormatArg::Html => Self::Html,
            FormatArg::RawHtml => Self::RawHtml,
            FormatArg::Links => Self::Links,
            FormatArg::Images => Self::Images,
            FormatArg::Summary => Self::Summary,
            FormatArg::Screenshot => Self::Screenshot,
        }
    }
}

/// Search source argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Web pages
    Web,
    /// News articles
    News,
    /// Images
    Images,
}

impl From<SourceArg> for SearchSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Web => Self::Web,
            SourceArg::News => Self::News,
            SourceArg::Images => Self::Images,
        }
    }
}

/// Job kind argument for `status` and `cancel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JobKindArg {
    /// A crawl job
    Crawl,
    /// A batch scrape job
    Batch,
    /// An extract job
    Extract,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

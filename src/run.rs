//! Command execution.
//!
//! Each subcommand maps to one client call; results are printed to stdout
//! as pretty JSON so they can be piped into other tools.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use firecrawl::config::{
    Command, ConfigError, FormatArg, JobKindArg, SourceArg, ValidatedConfig, default_config_path,
    write_default_config,
};
use firecrawl::time::Sleeper;
use firecrawl::transport::HttpClient;
use firecrawl::types::{
    BatchScrapeRequest, CrawlRequest, ExtractRequest, MapRequest, SchemaProperty, ScrapeOptions,
    ScrapeRequest, SearchRequest, SimpleFormat,
};
use firecrawl::webhook::{WebhookError, WebhookEvent, verify_signature};
use firecrawl::{BuildError, FirecrawlClient, FirecrawlError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration needed by this command is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The client could not be constructed.
    #[error("Failed to create client: {0}")]
    Build(#[from] BuildError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] FirecrawlError),

    /// A webhook body did not verify.
    #[error("Webhook verification failed: {0}")]
    Webhook(#[from] WebhookError),

    /// An input file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A schema file is not valid JSON schema.
    #[error("Invalid schema in '{}': {source}", path.display())]
    Schema {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A result could not be rendered as JSON.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing the result failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl RunError {
    /// Returns true if the failure is a configuration problem.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Build(_))
    }

    /// Returns a follow-up hint for errors the user can act on.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Api(FirecrawlError::Unauthorized { .. }) => {
                Some("Check the API key passed with --api-key or FIRECRAWL_API_KEY.")
            }
            Self::Api(FirecrawlError::PaymentRequired { .. }) => {
                Some("The team is out of credits; see 'firecrawl credits'.")
            }
            Self::Api(FirecrawlError::RateLimited { .. }) => {
                Some("Too many requests; wait a moment and retry.")
            }
            Self::Api(FirecrawlError::JobTimeout { .. }) => {
                Some("The job is still running; check it later with 'firecrawl status'.")
            }
            _ => None,
        }
    }
}

/// Executes a command and prints its result.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the API call fails,
/// an input cannot be read, or the result cannot be written.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let output = match command {
        Command::VerifyWebhook { body, signature } => {
            let secret = config.require_webhook_secret()?;
            let payload = read_input(&body)?;
            verify_webhook(&payload, &signature, secret)?
        }
        Command::Init { output } => {
            let path = init_config(output.as_deref())?;
            json!({ "written": path.display().to_string() })
        }
        command => {
            let client = config.client_builder().build()?;
            dispatch(&client, command).await?
        }
    };

    print_json(&mut std::io::stdout().lock(), &output)
}

/// Runs an API command against `client` and returns its JSON result.
pub async fn dispatch<H: HttpClient, S: Sleeper>(
    client: &FirecrawlClient<H, S>,
    command: Command,
) -> Result<Value, RunError> {
    let output = match command {
        Command::Scrape {
            url,
            formats,
            only_main_content,
            wait_for,
        } => {
            let request = scrape_request(url, &formats, only_main_content, wait_for);
            to_json(&client.scrape(&request).await?)?
        }
        Command::Crawl {
            url,
            limit,
            no_wait,
        } => {
            let mut request = CrawlRequest::new(url);
            if let Some(limit) = limit {
                request = request.with_limit(limit);
            }
            if no_wait {
                to_json(&client.start_crawl(&request).await?)?
            } else {
                to_json(&client.crawl(&request).await?)?
            }
        }
        Command::Map { url, search, limit } => {
            let request = MapRequest {
                search,
                limit,
                ..MapRequest::new(url)
            };
            to_json(&client.map(&request).await?)?
        }
        Command::Search {
            query,
            limit,
            sources,
        } => {
            let request = search_request(query, limit, &sources);
            to_json(&client.search(&request).await?)?
        }
        Command::Extract {
            urls,
            prompt,
            schema,
            no_wait,
        } => {
            let schema = schema.as_deref().map(read_schema).transpose()?;
            let request = extract_request(urls, prompt, schema);
            if no_wait {
                to_json(&client.start_extract(&request).await?)?
            } else {
                to_json(&client.extract(&request).await?)?
            }
        }
        Command::Batch {
            urls,
            formats,
            no_wait,
        } => {
            let request = BatchScrapeRequest::new(urls).with_options(scrape_options(&formats));
            if no_wait {
                to_json(&client.start_batch_scrape(&request).await?)?
            } else {
                to_json(&client.batch_scrape(&request).await?)?
            }
        }
        Command::Status { kind, id } => job_status(client, kind, &id).await?,
        Command::Cancel { kind, id } => cancel_job(client, kind, &id).await?,
        Command::Credits {
            historical,
            by_api_key,
        } => team_usage(client, TeamQuery::Credits, historical, by_api_key).await?,
        Command::Tokens {
            historical,
            by_api_key,
        } => team_usage(client, TeamQuery::Tokens, historical, by_api_key).await?,
        Command::Queue => team_usage(client, TeamQuery::Queue, false, false).await?,
        Command::VerifyWebhook { .. } | Command::Init { .. } => {
            return Err(RunError::Config(ConfigError::InvalidValue {
                field: "command",
                reason: "does not call the API".to_string(),
            }));
        }
    };

    Ok(output)
}

async fn job_status<H: HttpClient, S: Sleeper>(
    client: &FirecrawlClient<H, S>,
    kind: JobKindArg,
    id: &str,
) -> Result<Value, RunError> {
    let output = match kind {
        JobKindArg::Crawl => to_json(&client.get_crawl_status(id).await?)?,
        JobKindArg::Batch => to_json(&client.get_batch_scrape_status(id).await?)?,
        JobKindArg::Extract => to_json(&client.get_extract_status(id).await?)?,
    };
    Ok(output)
}

async fn cancel_job<H: HttpClient, S: Sleeper>(
    client: &FirecrawlClient<H, S>,
    kind: JobKindArg,
    id: &str,
) -> Result<Value, RunError> {
    let outcome = match kind {
        JobKindArg::Crawl => client.cancel_crawl(id).await?,
        JobKindArg::Batch => client.cancel_batch_scrape(id).await?,
        JobKindArg::Extract => client.cancel_extract(id).await?,
    };
    tracing::info!(job_id = %id, cancelled = outcome.is_cancelled(), "Cancel requested");
    to_json(&outcome)
}

/// Team-level usage reports.
#[derive(Debug, Clone, Copy)]
enum TeamQuery {
    Credits,
    Tokens,
    Queue,
}

async fn team_usage<H: HttpClient, S: Sleeper>(
    client: &FirecrawlClient<H, S>,
    query: TeamQuery,
    historical: bool,
    by_api_key: bool,
) -> Result<Value, RunError> {
    let output = match (query, historical) {
        (TeamQuery::Credits, true) => {
            to_json(&client.get_credit_usage_historical(by_api_key).await?)?
        }
        (TeamQuery::Credits, false) => to_json(&client.get_credit_usage().await?)?,
        (TeamQuery::Tokens, true) => {
            to_json(&client.get_token_usage_historical(by_api_key).await?)?
        }
        (TeamQuery::Tokens, false) => to_json(&client.get_token_usage().await?)?,
        (TeamQuery::Queue, _) => to_json(&client.get_queue_status().await?)?,
    };

    Ok(output)
}

/// Writes the config template to `output` or the default config path.
///
/// # Errors
///
/// Returns an error if no path is known or the file cannot be written.
pub fn init_config(output: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| {
            ConfigError::missing("output", "No config directory on this platform; use --output")
        })?,
    };

    write_default_config(&path)?;
    Ok(path)
}

/// Verifies a raw webhook body and decodes it if it is an event envelope.
fn verify_webhook(payload: &[u8], signature: &str, secret: &str) -> Result<Value, RunError> {
    verify_signature(payload, signature, secret)?;

    let event = match serde_json::from_slice::<WebhookEvent>(payload) {
        Ok(event) => to_json(&event)?,
        Err(e) => {
            tracing::warn!("Signature is valid but the body is not a webhook event: {e}");
            Value::Null
        }
    };

    Ok(json!({ "valid": true, "event": event }))
}

fn scrape_options(formats: &[FormatArg]) -> ScrapeOptions {
    if formats.is_empty() {
        ScrapeOptions::default()
    } else {
        ScrapeOptions::with_formats(formats.iter().copied().map(SimpleFormat::from))
    }
}

fn scrape_request(
    url: String,
    formats: &[FormatArg],
    only_main_content: bool,
    wait_for: Option<u64>,
) -> ScrapeRequest {
    let mut options = scrape_options(formats);
    if only_main_content {
        options.only_main_content = Some(true);
    }
    options.wait_for = wait_for;

    ScrapeRequest::new(url).with_options(options)
}

fn search_request(query: String, limit: Option<u32>, sources: &[SourceArg]) -> SearchRequest {
    SearchRequest {
        limit,
        sources: sources.iter().copied().map(Into::into).collect(),
        ..SearchRequest::new(query)
    }
}

fn extract_request(
    urls: Vec<String>,
    prompt: String,
    schema: Option<SchemaProperty>,
) -> ExtractRequest {
    let request = ExtractRequest::new(urls, prompt);
    match schema {
        Some(schema) => request.with_schema(schema),
        None => request,
    }
}

fn read_schema(path: &Path) -> Result<SchemaProperty, RunError> {
    let bytes = read_input(path)?;
    serde_json::from_slice(&bytes).map_err(|source| RunError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<Vec<u8>, RunError> {
    let read_error = |source| RunError::Read {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .map_err(read_error)?;
        Ok(buffer)
    } else {
        std::fs::read(path).map_err(read_error)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, RunError> {
    serde_json::to_value(value).map_err(RunError::from)
}

fn print_json(out: &mut impl Write, value: &Value) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| RunError::Output(e.into()))?;
    writeln!(out).map_err(RunError::Output)
}

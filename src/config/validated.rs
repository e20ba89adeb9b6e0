//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::client::ClientBuilder;
use crate::jobs::PollPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
pub struct ValidatedConfig {
    /// API key; present whenever the command talks to the API
    pub api_key: Option<String>,

    /// API base URL
    pub api_url: Url,

    /// Per-request timeout
    pub timeout: Duration,

    /// Response body cap in bytes
    pub max_body_bytes: usize,

    /// Interval and overall timeout for job waits
    pub poll_policy: PollPolicy,

    /// Webhook signing secret
    pub webhook_secret: Option<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("poll_policy", &self.poll_policy)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ api_url: {}, api_key: {}, timeout: {}s, max_body_bytes: {}, \
             poll_interval: {}s, poll_timeout: {}s, webhook_secret: {} }}",
            self.api_url,
            if self.api_key.is_some() { "set" } else { "unset" },
            self.timeout.as_secs(),
            self.max_body_bytes,
            self.poll_policy.interval.as_secs(),
            self.poll_policy.timeout.as_secs(),
            if self.webhook_secret.is_some() {
                "set"
            } else {
                "unset"
            },
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and the environment variables clap reads for them)
    /// take precedence over TOML config values, which take precedence
    /// over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is missing and the command needs one
    /// - The API URL is invalid or not http(s)
    /// - A duration or the body cap is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api_key = non_blank(cli.api_key.as_deref())
            .or_else(|| non_blank(toml.and_then(|t| t.api.key.as_deref())));

        if api_key.is_none() && cli.command.requires_api_key() {
            return Err(ConfigError::missing(
                field::API_KEY,
                "Use --api-key or FIRECRAWL_API_KEY, or set api.key in config file",
            ));
        }

        let api_url = Self::resolve_api_url(cli, toml)?;

        let timeout = resolve_duration(
            field::TIMEOUT,
            cli.timeout,
            toml.and_then(|t| t.api.timeout),
            defaults::TIMEOUT_SECS,
        )?;

        let max_body_bytes = Self::resolve_max_body_bytes(cli, toml)?;

        let poll_policy = Self::build_poll_policy(cli, toml)?;

        let webhook_secret = non_blank(cli.webhook_secret.as_deref())
            .or_else(|| non_blank(toml.and_then(|t| t.webhook.secret.as_deref())));

        Ok(Self {
            api_key,
            api_url,
            timeout,
            max_body_bytes,
            poll_policy,
            webhook_secret,
            verbose: cli.verbose,
        })
    }

    /// Loads configuration from CLI and the config file.
    ///
    /// An explicit `--config` path must exist. Without one, the file at
    /// [`default_config_path`] is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else if let Some(path) = default_config_path().filter(|p| p.is_file()) {
            tracing::debug!("Using config file {}", path.display());
            Some(TomlConfig::load(&path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns a client builder carrying every connection setting.
    ///
    /// The API key is only set when present; building without one fails
    /// with [`crate::BuildError::MissingApiKey`].
    #[must_use]
    pub fn client_builder(&self) -> ClientBuilder {
        let builder = ClientBuilder::new()
            .base_url(self.api_url.as_str())
            .timeout(self.timeout)
            .max_body_bytes(self.max_body_bytes)
            .poll_policy(self.poll_policy);

        match self.api_key {
            Some(ref key) => builder.api_key(key.as_str()),
            None => builder,
        }
    }

    /// Returns the webhook secret, or an error naming how to provide it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret was configured.
    pub fn require_webhook_secret(&self) -> Result<&str, ConfigError> {
        self.webhook_secret.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::WEBHOOK_SECRET,
                "Use --webhook-secret or FIRECRAWL_WEBHOOK_SECRET, or set webhook.secret in config file",
            )
        })
    }

    fn resolve_api_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .api_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.url.as_deref()))
            .unwrap_or(defaults::API_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_max_body_bytes(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<usize, ConfigError> {
        let limit = cli
            .max_body_bytes
            .or_else(|| toml.and_then(|t| t.api.max_body_bytes))
            .unwrap_or(defaults::MAX_BODY_BYTES);

        if limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: field::MAX_BODY_BYTES,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(limit)
    }

    fn build_poll_policy(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PollPolicy, ConfigError> {
        let interval = resolve_duration(
            field::POLL_INTERVAL,
            cli.poll_interval,
            toml.and_then(|t| t.poll.interval),
            defaults::POLL_INTERVAL_SECS,
        )?;

        let timeout = resolve_duration(
            field::POLL_TIMEOUT,
            cli.poll_timeout,
            toml.and_then(|t| t.poll.timeout),
            defaults::POLL_TIMEOUT_SECS,
        )?;

        Ok(PollPolicy::new()
            .with_interval(interval)
            .with_timeout(timeout))
    }
}

/// Location of the user config file, e.g. `~/.config/firecrawl/config.toml`.
///
/// Returns `None` on platforms without a config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Writes the default configuration template to a file.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(write_error)
}

/// Seconds from CLI, then TOML, then the default; zero is rejected.
fn resolve_duration(
    field: &'static str,
    cli: Option<u64>,
    toml: Option<u64>,
    default_secs: u64,
) -> Result<Duration, ConfigError> {
    let seconds = cli.or(toml).unwrap_or(default_secs);

    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

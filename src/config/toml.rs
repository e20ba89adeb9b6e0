//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API connection section
    #[serde(default)]
    pub api: ApiSection,

    /// Job polling section
    #[serde(default)]
    pub poll: PollSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API key
    pub key: Option<String>,

    /// API base URL
    pub url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Response body cap in bytes
    pub max_body_bytes: Option<usize>,
}

/// Job polling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    /// Seconds between status checks
    pub interval: Option<u64>,

    /// Seconds to wait before giving up
    pub timeout: Option<u64>,
}

/// Webhook verification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Signing secret shown in the team settings
    pub secret: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Firecrawl CLI Configuration File
# Values given on the command line or in FIRECRAWL_* environment
# variables take precedence over this file.

[api]
# API key (required for API commands)
# key = "fc-your-key"

# API base URL (default: https://api.firecrawl.dev)
# url = "http://localhost:3002"

# Per-request timeout in seconds (default: 30)
# timeout = 30

# Maximum accepted response body size in bytes (default: 10 MiB)
# max_body_bytes = 10485760

[poll]
# Seconds between job status checks (default: 2)
interval = 2

# Seconds to wait for a job before giving up (default: 300)
timeout = 300

[webhook]
# Signing secret used by `firecrawl verify-webhook`
# secret = "your-webhook-secret"
"#
    .to_string()
}

//! Configuration layer for the firecrawl CLI.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line, or
//!    the `FIRECRAWL_API_KEY` / `FIRECRAWL_WEBHOOK_SECRET` environment variables
//! 2. **TOML config file** - `--config`, else `<config dir>/firecrawl/config.toml` if present
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The API key has no default. It is required by every command except
//! `init` and `verify-webhook`; blank values count as missing.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FormatArg, JobKindArg, SourceArg};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, PollSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, write_default_config};

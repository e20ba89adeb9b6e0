//! Process plumbing for the `firecrawl` binary.
//!
//! Exit statuses, stderr logging and the follow-up hints printed after a
//! configuration failure. Results go to stdout; everything here writes to
//! stderr.

use firecrawl::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Process exit statuses.
pub mod exit_code {
    use std::process::ExitCode;

    /// The command ran and its result was printed.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad flags, an unreadable config file, or no API key (1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The API call, a job, or webhook verification failed (2).
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

const INIT_HINT: &str = "Run 'firecrawl init' to write a config template.";

/// What to tell the user after `error`, if anything.
#[must_use]
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::API_KEY => Some(
            "Create a key at https://firecrawl.dev and pass it with --api-key, \
             FIRECRAWL_API_KEY or the [api] section of the config file.",
        ),
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => Some(INIT_HINT),
        _ => None,
    }
}

/// Prints the hint for `error` to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Installs the stderr subscriber.
///
/// `RUST_LOG` overrides the level picked by `--verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

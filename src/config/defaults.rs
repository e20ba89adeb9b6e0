//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::client::ClientBuilder;
use crate::jobs::PollPolicy;
use crate::transport::ReqwestClient;

/// Default API location.
pub const API_URL: &str = ClientBuilder::DEFAULT_BASE_URL;

/// Default per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = ClientBuilder::DEFAULT_TIMEOUT.as_secs();

/// Default cap on response bodies, in bytes.
pub const MAX_BODY_BYTES: usize = ReqwestClient::DEFAULT_MAX_BODY_BYTES;

/// Default delay between job status checks in seconds.
pub const POLL_INTERVAL_SECS: u64 = PollPolicy::DEFAULT_INTERVAL.as_secs();

/// Default overall wait for a job in seconds.
pub const POLL_TIMEOUT_SECS: u64 = PollPolicy::DEFAULT_TIMEOUT.as_secs();

/// File name of the user configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform config dir holding [`CONFIG_FILE_NAME`].
pub const CONFIG_DIR_NAME: &str = "firecrawl";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default poll interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// Default poll timeout as Duration.
#[must_use]
pub const fn poll_timeout() -> Duration {
    Duration::from_secs(POLL_TIMEOUT_SECS)
}

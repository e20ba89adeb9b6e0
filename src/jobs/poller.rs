//! Waiting for asynchronous jobs to reach a terminal state.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use super::JobSnapshot;
use crate::error::FirecrawlError;
use crate::time::{Sleeper, TokioSleeper};

/// Interval and overall deadline used while waiting for a job.
///
/// # Defaults
///
/// - `interval`: 2 seconds
/// - `timeout`: 300 seconds
///
/// # Example
///
/// ```
/// use firecrawl::jobs::PollPolicy;
/// use std::time::Duration;
///
/// let policy = PollPolicy::new()
///     .with_interval(Duration::from_secs(5))
///     .with_timeout(Duration::from_secs(600));
/// assert_eq!(policy.interval, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two status checks.
    pub interval: Duration,

    /// Give up once this much time has passed since the first check.
    ///
    /// The deadline is compared after each sleep, so a wait can overshoot
    /// by at most one interval.
    pub timeout: Duration,
}

impl PollPolicy {
    /// Default delay between status checks (2 seconds).
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

    /// Default overall timeout (300 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the delay between status checks.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the overall timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Repeatedly checks a job until it reports a terminal status.
///
/// The poller holds no per-job state, so one instance can drive any number
/// of concurrent waits. Dropping the future returned by [`JobPoller::wait`]
/// stops polling at the next await point.
///
/// # Type Parameters
///
/// - `S`: The sleeper used between checks (defaults to [`TokioSleeper`])
#[derive(Debug, Clone)]
pub struct JobPoller<S = TokioSleeper> {
    policy: PollPolicy,
    sleeper: S,
}

impl JobPoller<TokioSleeper> {
    /// Creates a poller that sleeps on the Tokio timer.
    #[must_use]
    pub const fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            sleeper: TokioSleeper,
        }
    }
}

impl Default for JobPoller<TokioSleeper> {
    fn default() -> Self {
        Self::new(PollPolicy::default())
    }
}

impl<S> JobPoller<S> {
    /// Replaces the sleeper.
    ///
    /// Primarily useful for tests that should not wait in real time.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> JobPoller<S2> {
        JobPoller {
            policy: self.policy,
            sleeper,
        }
    }

    /// Replaces the policy, keeping the sleeper.
    #[must_use]
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> &PollPolicy {
        &self.policy
    }
}

impl<S: Sleeper> JobPoller<S> {
    /// Calls `check` until the returned snapshot is terminal.
    ///
    /// Returns the first terminal snapshot. `check` is invoked once
    /// immediately, then once after every interval.
    ///
    /// # Errors
    ///
    /// - Any error returned by `check`, without further attempts
    /// - [`FirecrawlError::JobTimeout`] once the policy timeout has elapsed
    ///   without a terminal status
    pub async fn wait<T, F, Fut>(&self, job_id: &str, mut check: F) -> Result<T, FirecrawlError>
    where
        T: JobSnapshot,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FirecrawlError>>,
    {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let snapshot = check().await?;
            let status = snapshot.status();

            if status.is_terminal() {
                tracing::info!(job_id, %status, attempts = attempt, "Job finished");
                return Ok(snapshot);
            }

            match snapshot.progress() {
                Some((completed, total)) => {
                    tracing::debug!(job_id, %status, completed, total, attempt, "Job in progress");
                }
                None => tracing::debug!(job_id, %status, attempt, "Job in progress"),
            }

            self.sleeper.sleep(self.policy.interval).await;

            if started.elapsed() >= self.policy.timeout {
                tracing::warn!(job_id, timeout = ?self.policy.timeout, "Gave up waiting for job");
                return Err(FirecrawlError::JobTimeout {
                    job_id: job_id.to_string(),
                    timeout: self.policy.timeout,
                });
            }
        }
    }
}

//! Time abstraction for testability.
//!
//! The job poller waits between status checks through a [`Sleeper`], so tests
//! can swap the real Tokio timer for [`InstantSleeper`] and run without delays.

use std::future::Future;
use std::time::Duration;

/// Abstraction over asynchronous waiting.
///
/// Implementations must suspend without busy-waiting. Dropping the returned
/// future cancels the wait.
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
///
/// Honors Tokio's paused clock, so `#[tokio::test(start_paused = true)]`
/// tests advance virtual time instead of sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests that care about the number of poll iterations rather than
/// the time spent between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

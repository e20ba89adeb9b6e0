//! Job status values and the snapshot abstraction shared by all job kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a server-side job.
///
/// `completed`, `failed` and `cancelled` are terminal; everything else
/// means the job is still running. Status strings this crate does not know
/// decode as [`JobStatus::Unknown`] and are treated as in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Queued but not started
    Pending,
    /// Crawl or batch scrape in progress
    Scraping,
    /// Extraction in progress
    Processing,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Cancelled by the caller
    Cancelled,
    /// A status string this crate does not recognize
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Returns true if no further transitions can occur.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scraping => "scraping",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freshly fetched view of a job's state.
///
/// Implemented by every status response the poller can wait on.
pub trait JobSnapshot {
    /// Current job status.
    fn status(&self) -> JobStatus;

    /// `(completed, total)` progress counters, when the job reports them.
    fn progress(&self) -> Option<(u64, u64)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn in_progress_statuses() {
        for status in [
            JobStatus::Pending,
            JobStatus::Scraping,
            JobStatus::Processing,
            JobStatus::Unknown,
        ] {
            assert!(!status.is_terminal(), "{status} should not be terminal");
        }
    }

    #[test]
    fn decodes_wire_strings() {
        let status: JobStatus = serde_json::from_str(r#""scraping""#).unwrap();
        assert_eq!(status, JobStatus::Scraping);

        let status: JobStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, JobStatus::Cancelled);
    }

    #[test]
    fn unrecognized_status_is_unknown() {
        let status: JobStatus = serde_json::from_str(r#""throttled""#).unwrap();

        assert_eq!(status, JobStatus::Unknown);
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(JobStatus::Processing.to_string(), "processing");
        assert_eq!(
            serde_json::to_string(&JobStatus::Completed).unwrap(),
            r#""completed""#
        );
    }
}

//! Asynchronous job lifecycle: status values and the start → poll → done
//! protocol shared by crawl, batch scrape and extract jobs.

mod poller;
mod status;


pub use poller::{JobPoller, PollPolicy};
pub use status::{JobSnapshot, JobStatus};

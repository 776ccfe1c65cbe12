//! cvpipe Core - Batch pipeline infrastructure
//!
//! This crate provides the shared machinery for both cvpipe pipelines
//! (CV download, education-history extraction): work items keyed by a
//! stable identity, a bounded concurrent executor with per-unit failure
//! isolation, rate-limit retry, and HTTP plumbing.

pub mod error;
pub mod executor;
pub mod http;
pub mod item;
pub mod logging;
pub mod progress;
pub mod queue;
pub mod retry;

// Re-exports for convenience
pub use error::UnitError;
pub use executor::run_batch;
pub use http::{get_to_file, http_client, post_json};
pub use item::{BatchSummary, Outcome, WorkItem, WorkResult, successes_by_identity};
pub use logging::init_logging;
pub use progress::{ProgressContext, SharedProgress};
pub use queue::WorkQueue;
pub use retry::retry_rate_limited;

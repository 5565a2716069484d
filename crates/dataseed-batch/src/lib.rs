//! Resumable batch processing for dataseed.
//!
//! Drives a list of work items through an external call with bounded
//! retries, a fixed-interval throttle, and periodic checkpoints so an
//! interrupted run can resume without repeating completed work.

pub mod atomic;
pub mod caller;
pub mod config;
pub mod error_log;
pub mod errors;
pub mod processor;
pub mod progress;
pub mod retry;
pub mod store;
pub mod throttle;

pub use caller::Caller;
pub use config::BatchConfig;
pub use error_log::{ErrorSink, FileErrorLog};
pub use errors::{BatchError, StoreError};
pub use processor::{BatchProcessor, RunSummary};
pub use progress::{Progress, ProgressObserver, TracingObserver};
pub use retry::{ItemOutcome, RetryPolicy};
pub use store::{CheckpointStore, JsonCheckpointStore, StoredState};
pub use throttle::Throttle;

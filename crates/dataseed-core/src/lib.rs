//! Core contracts shared by the dataseed crates.
//!
//! Defines work items, call outcomes, result and error records, and the
//! checkpoint document used to resume interrupted batch runs.

pub mod checkpoint;
pub mod error;
pub mod item;
pub mod outcome;
pub mod record;
pub mod redaction;
pub mod source;

pub use checkpoint::Checkpoint;
pub use error::{Error, Result};
pub use item::{DoneSet, WorkItem};
pub use outcome::{CallOutcome, FailureKind};
pub use record::{ErrorRecord, ResultRecord};
pub use redaction::{RedactedEndpoint, redact_endpoint, redact_secret};
pub use source::WorkSource;

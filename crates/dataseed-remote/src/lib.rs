//! HTTP callers used by dataseed batch jobs.
//!
//! Each caller performs exactly one request per invocation and maps the
//! response onto a transient or permanent outcome; retries are left to the
//! batch processor.

mod classify;
pub mod description;
pub mod errors;
pub mod registration;

pub use description::{DescriptionAgent, DescriptionAgentConfig};
pub use errors::RemoteError;
pub use registration::{Registrar, RegistrarConfig};

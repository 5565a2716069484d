use thiserror::Error;

/// Core error type shared across dataseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A work item is missing a required metadata field.
    #[error("invalid work item '{key}': {message}")]
    InvalidItem { key: String, message: String },
    /// The work source could not be read.
    #[error("work source error: {0}")]
    WorkSource(String),
}

/// Convenience alias for results returned by dataseed crates.
pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Fatal errors that abort a batch run.
///
/// Per-item failures never surface here, including failures to record them.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),
    #[error("work source unavailable: {0}")]
    WorkSource(#[source] dataseed_core::Error),
    #[error("checkpoint store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors reading or writing checkpoint documents.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid store state: {0}")]
    Invalid(String),
}

use thiserror::Error;

/// Errors constructing a remote caller.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid remote configuration: {0}")]
    InvalidConfig(String),
}

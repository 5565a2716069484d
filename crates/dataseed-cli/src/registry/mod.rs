mod logging;
mod run;

pub use logging::init_logging;
pub use run::write_manifest;

use thiserror::Error;

/// Errors writing run logs and manifests.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest write error: {0}")]
    Store(#[from] dataseed_batch::StoreError),
    #[error("logging error: {0}")]
    Logging(String),
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

mod ids;
mod manifests;
mod paths;
mod settings;

pub use ids::new_artifact_id;
pub use manifests::{ArtifactStatus, CLI_VERSION, RunManifest};
pub use paths::WorkspacePaths;
pub use settings::{
    DescribeSettings, RegisterSettings, WorkspaceSettings, load_or_create_settings, save_settings,
};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("write error: {0}")]
    Store(#[from] dataseed_batch::StoreError),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

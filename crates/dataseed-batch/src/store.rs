use std::path::{Path, PathBuf};

use dataseed_core::{Checkpoint, ResultRecord};
use tracing::debug;

use crate::atomic::write_json_atomic;
use crate::errors::StoreError;

/// Checkpoint and results as last persisted.
#[derive(Debug, Clone, Default)]
pub struct StoredState {
    pub checkpoint: Checkpoint,
    pub results: Vec<ResultRecord>,
}

/// Durable storage for batch progress.
///
/// `load` returns an empty state when nothing was persisted yet. `save`
/// overwrites the previous snapshot as a whole.
pub trait CheckpointStore: Send {
    fn load(&self) -> Result<StoredState, StoreError>;
    fn save(&mut self, checkpoint: &Checkpoint, results: &[ResultRecord]) -> Result<(), StoreError>;
}

/// Two JSON documents on disk: a progress file and a results file.
#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    progress_path: PathBuf,
    results_path: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(progress_path: impl Into<PathBuf>, results_path: impl Into<PathBuf>) -> Self {
        Self {
            progress_path: progress_path.into(),
            results_path: results_path.into(),
        }
    }

    /// `progress.json` and `results.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("progress.json"), dir.join("results.json"))
    }

    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }
}

impl CheckpointStore for JsonCheckpointStore {
    fn load(&self) -> Result<StoredState, StoreError> {
        let checkpoint = if self.progress_path.exists() {
            let content = std::fs::read_to_string(&self.progress_path)?;
            serde_json::from_str(&content)?
        } else {
            Checkpoint::default()
        };

        let results = if self.results_path.exists() {
            let content = std::fs::read_to_string(&self.results_path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(StoredState {
            checkpoint,
            results,
        })
    }

    fn save(&mut self, checkpoint: &Checkpoint, results: &[ResultRecord]) -> Result<(), StoreError> {
        // Results first: a crash in between leaves results the next load
        // folds back into the done set.
        write_json_atomic(&self.results_path, results)?;
        write_json_atomic(&self.progress_path, checkpoint)?;
        debug!(
            progress = %self.progress_path.display(),
            done = checkpoint.processed_keys.len(),
            results = results.len(),
            "checkpoint persisted"
        );
        Ok(())
    }
}

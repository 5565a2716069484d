use std::path::{Path, PathBuf};

use super::{WorkspaceError, WorkspaceResult};

/// Directory layout of a dataseed workspace.
///
/// ```text
/// <root>/config/settings.toml
/// <root>/logs/<run_id>.ndjson
/// <root>/runs/<run_id>.json
/// <root>/state/<job>/{progress.json,results.json,errors.log}
/// <root>/out/
/// ```
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub runs_dir: PathBuf,
    pub state_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: PathBuf) -> Self {
        let config_dir = root.join("config");
        let logs_dir = root.join("logs");
        let runs_dir = root.join("runs");
        let state_dir = root.join("state");
        let out_dir = root.join("out");
        Self {
            root,
            config_dir,
            logs_dir,
            runs_dir,
            state_dir,
            out_dir,
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.toml")
    }

    pub fn log_path(&self, run_id: &str) -> PathBuf {
        self.logs_dir.join(format!("{run_id}.ndjson"))
    }

    pub fn manifest_path(&self, run_id: &str) -> PathBuf {
        self.runs_dir.join(format!("{run_id}.json"))
    }

    /// Checkpoint, results and error log of one job live together so a
    /// rerun of the same job resumes from them.
    pub fn job_state_dir(&self, job: &str) -> PathBuf {
        self.state_dir.join(job)
    }

    pub fn ensure_dirs(&self) -> WorkspaceResult<()> {
        create_if_missing(&self.root)?;
        create_if_missing(&self.config_dir)?;
        create_if_missing(&self.logs_dir)?;
        create_if_missing(&self.runs_dir)?;
        create_if_missing(&self.state_dir)?;
        create_if_missing(&self.out_dir)?;
        Ok(())
    }
}

fn create_if_missing(path: &Path) -> WorkspaceResult<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(WorkspaceError::from)
}

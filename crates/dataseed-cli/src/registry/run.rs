use dataseed_batch::atomic::write_json_atomic;
use tracing::debug;

use super::RegistryResult;
use crate::workspace::{RunManifest, WorkspacePaths};

/// Atomically (re)write `runs/<run_id>.json`.
pub fn write_manifest(paths: &WorkspacePaths, manifest: &RunManifest) -> RegistryResult<()> {
    let path = paths.manifest_path(&manifest.run_id);
    write_json_atomic(&path, manifest)?;
    debug!(event = "manifest_written", path = %path.display(), status = ?manifest.status);
    Ok(())
}

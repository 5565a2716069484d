use chrono::{DateTime, Utc};
use dataseed_batch::{BatchConfig, RunSummary};
use serde::Serialize;

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArtifactStatus {
    Running,
    Ok,
    Error,
    Cancelled,
}

/// `runs/<run_id>.json`, rewritten when the job starts and when it ends.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub run_id: String,
    pub job: String,
    pub status: ArtifactStatus,
    /// Endpoint with credentials and sensitive query values masked.
    pub endpoint: String,
    pub state_dir: String,
    pub config: BatchConfig,
    pub summary: Option<RunSummary>,
    pub error: Option<String>,
    pub cli_version: String,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunManifest {
    pub fn started(
        run_id: &str,
        job: &str,
        endpoint: String,
        state_dir: String,
        config: BatchConfig,
    ) -> Self {
        Self {
            run_id: run_id.to_string(),
            job: job.to_string(),
            status: ArtifactStatus::Running,
            endpoint,
            state_dir,
            config,
            summary: None,
            error: None,
            cli_version: CLI_VERSION.to_string(),
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self, outcome: Result<&RunSummary, String>) {
        match outcome {
            Ok(summary) => {
                self.status = if summary.cancelled {
                    ArtifactStatus::Cancelled
                } else {
                    ArtifactStatus::Ok
                };
                self.summary = Some(summary.clone());
            }
            Err(message) => {
                self.status = ArtifactStatus::Error;
                self.error = Some(message);
            }
        }
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(cancelled: bool) -> RunSummary {
        RunSummary {
            total: 5,
            skipped: 0,
            processed: 5,
            succeeded: 4,
            failed: 1,
            checkpoints_written: 1,
            unlogged_failures: 0,
            done: 4,
            results: 4,
            elapsed_ms: 12,
            cancelled,
        }
    }

    #[test]
    fn finish_maps_summary_to_status() {
        let mut manifest = RunManifest::started(
            "run",
            "register",
            "http://localhost/register".to_string(),
            "state/register".to_string(),
            BatchConfig::default(),
        );
        assert_eq!(
            serde_json::to_value(&manifest).expect("serialize")["status"],
            json!("RUNNING")
        );

        manifest.finish(Ok(&summary(true)));
        assert_eq!(manifest.status, ArtifactStatus::Cancelled);

        manifest.finish(Ok(&summary(false)));
        assert_eq!(manifest.status, ArtifactStatus::Ok);
        assert!(manifest.finished_at.is_some());

        manifest.finish(Err("checkpoint store: disk full".to_string()));
        let value = serde_json::to_value(&manifest).expect("serialize");
        assert_eq!(value["status"], json!("ERROR"));
        assert_eq!(value["error"], json!("checkpoint store: disk full"));
    }
}

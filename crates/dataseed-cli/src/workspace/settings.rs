use dataseed_batch::BatchConfig;
use dataseed_batch::atomic::write_bytes_atomic;
use serde::{Deserialize, Serialize};

use super::{WorkspacePaths, WorkspaceResult};

/// Contents of `config/settings.toml`. Missing sections and keys fall back
/// to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub batch: BatchConfig,
    pub describe: DescribeSettings,
    pub register: RegisterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeSettings {
    pub endpoint: String,
    pub agent_id: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Overrides `batch.max_requests_per_second` for this job.
    pub max_requests_per_second: Option<f64>,
}

impl Default for DescribeSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mistral.ai/v1/conversations".to_string(),
            agent_id: String::new(),
            api_key_env: "DATASEED_API_KEY".to_string(),
            timeout_secs: 60,
            max_requests_per_second: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Overrides `batch.max_requests_per_second` for this job.
    pub max_requests_per_second: Option<f64>,
}

impl Default for RegisterSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8092/apiGateway/member/register".to_string(),
            timeout_secs: 10,
            max_requests_per_second: Some(10.0),
        }
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let settings: WorkspaceSettings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = WorkspaceSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &WorkspaceSettings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&paths.settings_path(), encoded.as_bytes())?;
    Ok(())
}

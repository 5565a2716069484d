use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::item::WorkItem;
use crate::outcome::FailureKind;

/// Output of one successful external call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub key: String,
    pub payload: Value,
    #[serde(default)]
    pub metadata: Value,
    pub completed_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn from_item(item: &WorkItem, payload: Value) -> Self {
        Self {
            key: item.key.clone(),
            payload,
            metadata: item.metadata.clone(),
            completed_at: Utc::now(),
        }
    }
}

/// A failed item, as written to the error log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    pub key: String,
    pub kind: FailureKind,
    pub description: String,
}

impl ErrorRecord {
    pub fn new(key: impl Into<String>, kind: FailureKind, description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            key: key.into(),
            kind,
            description: description.into(),
        }
    }

    /// Single-line rendering used by append-only error logs.
    pub fn to_log_line(&self) -> String {
        let description = self.description.replace(['\n', '\r'], " ");
        format!(
            "[{}] {}: {}: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.key,
            self.kind,
            description
        )
    }
}

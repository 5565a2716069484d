use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::DoneSet;

/// Durable progress document for a batch run.
///
/// Overwritten in place at every checkpoint boundary; the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(default, alias = "processed_titles")]
    pub processed_keys: DoneSet,
    #[serde(default)]
    pub last_index: Option<u64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Checkpoint {
    pub fn snapshot(done: &DoneSet, last_index: Option<u64>, completed: bool) -> Self {
        Self {
            processed_keys: done.clone(),
            last_index,
            completed,
            updated_at: Some(Utc::now()),
        }
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One unit of work submitted to an external service.
///
/// The key must be stable across runs; it is the only thing the batch
/// processor uses to decide whether the item was already handled. Metadata
/// is opaque to the processor and only interpreted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub key: String,
    #[serde(default)]
    pub metadata: Value,
}

impl WorkItem {
    pub fn new(key: impl Into<String>, metadata: Value) -> Self {
        Self {
            key: key.into(),
            metadata,
        }
    }

    /// Item with no metadata.
    pub fn bare(key: impl Into<String>) -> Self {
        Self::new(key, Value::Null)
    }

    /// Read a required string field from the metadata object.
    pub fn metadata_str(&self, field: &str) -> Result<&str> {
        self.metadata
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidItem {
                key: self.key.clone(),
                message: format!("missing string field '{field}'"),
            })
    }
}

/// Keys of work items confirmed as successfully processed.
///
/// Grows monotonically during a run. Ordered so persisted checkpoints are
/// stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoneSet {
    keys: BTreeSet<String>,
}

impl DoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns true when the key was not already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for DoneSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

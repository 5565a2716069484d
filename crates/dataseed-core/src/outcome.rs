use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a single attempt of an external call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Success { payload: Value },
    /// Network-level failure expected to clear on retry.
    TransientFailure { reason: String },
    /// The remote rejected the request; retrying will not help.
    PermanentFailure { reason: String },
}

impl CallOutcome {
    pub fn success(payload: Value) -> Self {
        CallOutcome::Success { payload }
    }

    pub fn transient(reason: impl Into<String>) -> Self {
        CallOutcome::TransientFailure {
            reason: reason.into(),
        }
    }

    pub fn permanent(reason: impl Into<String>) -> Self {
        CallOutcome::PermanentFailure {
            reason: reason.into(),
        }
    }
}

/// How an item ended up failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Permanent failure on the first attempt, never retried.
    Rejected,
    /// Every allowed attempt failed with a transient error.
    Exhausted { attempts: u32 },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Rejected => write!(f, "rejected"),
            FailureKind::Exhausted { attempts } => {
                write!(f, "exhausted after {attempts} attempts")
            }
        }
    }
}

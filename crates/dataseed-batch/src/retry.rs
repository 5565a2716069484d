use std::time::Duration;

use dataseed_core::{CallOutcome, FailureKind, WorkItem};
use serde_json::Value;
use tracing::debug;

use crate::caller::Caller;
use crate::config::BatchConfig;

/// Final classification of one item after retries.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Succeeded { payload: Value, attempts: u32 },
    Failed { kind: FailureKind, reason: String },
}

/// Fixed-delay bounded retry around a single-attempt [`Caller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay())
    }

    pub async fn execute(&self, caller: &dyn Caller, item: &WorkItem) -> ItemOutcome {
        let mut last_reason = String::new();

        for attempt in 1..=self.max_attempts {
            match caller.call(item).await {
                CallOutcome::Success { payload } => {
                    return ItemOutcome::Succeeded {
                        payload,
                        attempts: attempt,
                    };
                }
                CallOutcome::PermanentFailure { reason } => {
                    return ItemOutcome::Failed {
                        kind: FailureKind::Rejected,
                        reason,
                    };
                }
                CallOutcome::TransientFailure { reason } => {
                    debug!(
                        key = %item.key,
                        attempt,
                        max_attempts = self.max_attempts,
                        reason = %reason,
                        "transient failure"
                    );
                    last_reason = reason;
                    if attempt < self.max_attempts && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        ItemOutcome::Failed {
            kind: FailureKind::Exhausted {
                attempts: self.max_attempts,
            },
            reason: last_reason,
        }
    }
}

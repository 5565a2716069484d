use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::BatchError;

/// Options for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Attempts per item, including the first one.
    pub max_attempts: u32,
    /// Fixed delay between attempts of the same item.
    pub retry_delay_ms: u64,
    /// Persist the checkpoint after this many processed items.
    pub checkpoint_every: usize,
    /// Upper bound on dispatch rate; `None` disables the throttle.
    pub max_requests_per_second: Option<f64>,
    /// Calls allowed in flight at once.
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 5000,
            checkpoint_every: 10,
            max_requests_per_second: Some(2.0),
            concurrency: 1,
        }
    }
}

impl BatchConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn validate(&self) -> Result<(), BatchError> {
        if self.max_attempts == 0 {
            return Err(BatchError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.checkpoint_every == 0 {
            return Err(BatchError::InvalidConfig(
                "checkpoint_every must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(BatchError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if let Some(rate) = self.max_requests_per_second {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(BatchError::InvalidConfig(format!(
                    "max_requests_per_second must be positive, got {rate}"
                )));
            }
            if dispatch_interval(rate).is_none() {
                return Err(BatchError::InvalidConfig(format!(
                    "max_requests_per_second {rate} is too small to pace dispatches"
                )));
            }
        }
        Ok(())
    }
}

/// Spacing between dispatches for `rate` per second, if it fits a `Duration`.
pub(crate) fn dispatch_interval(rate: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / rate).ok()
}

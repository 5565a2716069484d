use std::time::Duration;

use tokio::time::Instant;

use crate::config::dispatch_interval;

/// Minimum spacing between consecutive dispatches.
///
/// A plain fixed delay, no bursts or adaptation.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Option<Duration>,
    last_dispatch: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval: interval.filter(|interval| !interval.is_zero()),
            last_dispatch: None,
        }
    }

    /// Throttle for at most `rate` dispatches per second; `None` never waits.
    ///
    /// Rates that `BatchConfig::validate` rejects also never wait.
    pub fn per_second(rate: Option<f64>) -> Self {
        let interval = rate
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .and_then(dispatch_interval);
        Self::new(interval)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Wait until the next dispatch is allowed, then record it.
    pub async fn ready(&mut self) {
        if let (Some(interval), Some(last)) = (self.interval, self.last_dispatch) {
            tokio::time::sleep_until(last + interval).await;
        }
        self.last_dispatch = Some(Instant::now());
    }
}

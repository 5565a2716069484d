use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::processor::RunSummary;

/// Snapshot reported at each checkpoint boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
    pub estimated_remaining: Option<Duration>,
}

impl Progress {
    pub fn new(
        processed: usize,
        total: usize,
        succeeded: usize,
        failed: usize,
        elapsed: Duration,
    ) -> Self {
        let estimated_remaining = estimate_remaining(processed, total, elapsed);
        Self {
            processed,
            total,
            succeeded,
            failed,
            elapsed,
            estimated_remaining,
        }
    }
}

fn estimate_remaining(processed: usize, total: usize, elapsed: Duration) -> Option<Duration> {
    let elapsed_secs = elapsed.as_secs_f64();
    if processed == 0 || elapsed_secs <= 0.0 {
        return None;
    }
    let rate = processed as f64 / elapsed_secs;
    let left = total.saturating_sub(processed) as f64;
    Some(Duration::from_secs_f64(left / rate))
}

/// Side channel for progress display. Has no effect on the run.
pub trait ProgressObserver: Send + Sync {
    fn on_checkpoint(&self, progress: &Progress);

    fn on_finish(&self, _summary: &RunSummary) {}
}

/// Reports progress as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_checkpoint(&self, progress: &Progress) {
        info!(
            event = "progress_saved",
            processed = progress.processed,
            total = progress.total,
            succeeded = progress.succeeded,
            failed = progress.failed,
            elapsed_ms = progress.elapsed.as_millis() as u64,
            remaining_secs = progress.estimated_remaining.map(|d| d.as_secs()),
        );
    }

    fn on_finish(&self, summary: &RunSummary) {
        info!(
            event = "batch_summary",
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            cancelled = summary.cancelled,
            elapsed_ms = summary.elapsed_ms,
        );
    }
}

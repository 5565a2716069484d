use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dataseed_core::{
    Checkpoint, DoneSet, ErrorRecord, FailureKind, ResultRecord, WorkItem, WorkSource,
};
use serde::Serialize;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::caller::Caller;
use crate::config::BatchConfig;
use crate::error_log::ErrorSink;
use crate::errors::BatchError;
use crate::progress::{Progress, ProgressObserver, TracingObserver};
use crate::retry::{ItemOutcome, RetryPolicy};
use crate::store::{CheckpointStore, StoredState};
use crate::throttle::Throttle;

/// Totals for one call of [`BatchProcessor::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Items yielded by the work source.
    pub total: usize,
    /// Items skipped because they were already done or repeated a key.
    pub skipped: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub checkpoints_written: usize,
    /// Failures the error sink refused; they only appear in the run log.
    pub unlogged_failures: usize,
    /// Size of the done set after the final checkpoint.
    pub done: usize,
    /// Size of the result list after the final checkpoint.
    pub results: usize,
    pub elapsed_ms: u64,
    pub cancelled: bool,
}

/// Drives work items through a [`Caller`] with retries, throttling and
/// periodic checkpoints.
///
/// The processor itself holds only configuration. All mutable state for a
/// run lives inside [`BatchProcessor::run`] and is owned by its driver loop,
/// which is the only writer of the done set, the result list, the
/// checkpoint store and the error log.
pub struct BatchProcessor {
    config: BatchConfig,
    caller: Arc<dyn Caller>,
    observer: Arc<dyn ProgressObserver>,
    retry: RetryPolicy,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig, caller: Arc<dyn Caller>) -> Result<Self, BatchError> {
        config.validate()?;
        let retry = RetryPolicy::from_config(&config);
        Ok(Self {
            config,
            caller,
            observer: Arc::new(TracingObserver),
            retry,
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn run(
        &self,
        source: &dyn WorkSource,
        store: &mut dyn CheckpointStore,
        errors: &mut dyn ErrorSink,
        cancel: CancellationToken,
    ) -> Result<RunSummary, BatchError> {
        let items = source.items().map_err(BatchError::WorkSource)?;
        let mut state = RunState::restore(store.load()?);

        let total_items = items.len();
        let remaining = state.remaining(items);
        let total = remaining.len();
        let skipped = total_items - total;

        info!(
            event = "batch_started",
            items = total_items,
            remaining = total,
            already_done = state.done.len(),
            concurrency = self.config.concurrency,
            max_requests_per_second = self.config.max_requests_per_second,
        );

        let start = Instant::now();
        let mut throttle = Throttle::per_second(self.config.max_requests_per_second);
        let mut queue = remaining.into_iter();
        let mut in_flight: JoinSet<(usize, WorkItem, ItemOutcome)> = JoinSet::new();
        let mut pending: HashMap<Id, String> = HashMap::new();
        let mut cancelled = false;

        'run: loop {
            while in_flight.len() < self.config.concurrency {
                let Some((index, item)) = queue.next() else {
                    break;
                };

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        cancelled = true;
                        break 'run;
                    }
                    _ = throttle.ready() => {}
                }

                let caller = Arc::clone(&self.caller);
                let retry = self.retry;
                let key = item.key.clone();
                let handle = in_flight.spawn(async move {
                    let outcome = retry.execute(caller.as_ref(), &item).await;
                    (index, item, outcome)
                });
                pending.insert(handle.id(), key);
            }

            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break 'run;
                }
                joined = in_flight.join_next_with_id() => joined,
            };

            let Some(joined) = joined else {
                break;
            };
            self.complete(joined, &mut pending, &mut state, errors);

            if state.processed % self.config.checkpoint_every == 0 {
                self.checkpoint(&mut state, store, false)?;
                self.observer.on_checkpoint(&state.progress(total, start));
            }
        }

        if cancelled {
            // Keep whatever already finished, drop the rest; dropped items
            // stay out of the done set and are retried next run.
            while let Some(joined) = in_flight.try_join_next_with_id() {
                self.complete(joined, &mut pending, &mut state, errors);
            }
            in_flight.shutdown().await;
            warn!(
                event = "batch_cancelled",
                processed = state.processed,
                abandoned = pending.len(),
            );
        }

        self.checkpoint(&mut state, store, !cancelled)?;
        self.observer.on_checkpoint(&state.progress(total, start));

        let summary = RunSummary {
            total: total_items,
            skipped,
            processed: state.processed,
            succeeded: state.succeeded,
            failed: state.failed,
            checkpoints_written: state.checkpoints_written,
            unlogged_failures: state.unlogged_failures,
            done: state.done.len(),
            results: state.results.len(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            cancelled,
        };

        info!(
            event = "batch_finished",
            status = if cancelled { "cancelled" } else { "completed" },
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            checkpoints = summary.checkpoints_written,
            duration_ms = summary.elapsed_ms,
        );
        self.observer.on_finish(&summary);

        Ok(summary)
    }

    fn complete(
        &self,
        joined: Result<(Id, (usize, WorkItem, ItemOutcome)), JoinError>,
        pending: &mut HashMap<Id, String>,
        state: &mut RunState,
        errors: &mut dyn ErrorSink,
    ) {
        match joined {
            Ok((id, (index, item, outcome))) => {
                pending.remove(&id);
                state.apply(index, &item, outcome, errors)
            }
            Err(err) => {
                let key = pending.remove(&err.id()).unwrap_or_default();
                let reason = if err.is_panic() {
                    "caller panicked".to_string()
                } else {
                    err.to_string()
                };
                let outcome = ItemOutcome::Failed {
                    kind: FailureKind::Rejected,
                    reason,
                };
                state.apply_failure(&key, outcome, errors);
            }
        }
    }

    fn checkpoint(
        &self,
        state: &mut RunState,
        store: &mut dyn CheckpointStore,
        completed: bool,
    ) -> Result<(), BatchError> {
        let checkpoint = Checkpoint::snapshot(&state.done, state.last_index, completed);
        store.save(&checkpoint, &state.results)?;
        state.checkpoints_written += 1;
        Ok(())
    }
}

/// Mutable state of one run.
#[derive(Debug, Default)]
struct RunState {
    done: DoneSet,
    results: Vec<ResultRecord>,
    processed: usize,
    succeeded: usize,
    failed: usize,
    last_index: Option<u64>,
    checkpoints_written: usize,
    unlogged_failures: usize,
}

impl RunState {
    /// Rebuild state from storage, restoring `done ⊇ keys(results)` and
    /// dropping repeated result keys.
    fn restore(stored: StoredState) -> Self {
        let StoredState {
            checkpoint,
            mut results,
        } = stored;
        let mut done = checkpoint.processed_keys;

        let before = results.len();
        let mut seen = HashSet::new();
        results.retain(|record| seen.insert(record.key.clone()));
        if results.len() != before {
            warn!(
                event = "duplicate_results_dropped",
                dropped = before - results.len()
            );
        }

        let mut recovered = 0_usize;
        for record in &results {
            if done.insert(record.key.clone()) {
                recovered += 1;
            }
        }
        if recovered > 0 {
            warn!(event = "done_keys_recovered", recovered);
        }
        if !done.is_empty() {
            info!(
                event = "checkpoint_loaded",
                done = done.len(),
                results = results.len(),
                completed = checkpoint.completed,
            );
        }

        Self {
            done,
            results,
            last_index: checkpoint.last_index,
            ..Self::default()
        }
    }

    /// Items not yet done, each key at most once, paired with their
    /// position in the source.
    fn remaining(&self, items: Vec<WorkItem>) -> Vec<(usize, WorkItem)> {
        let mut seen = HashSet::new();
        items
            .into_iter()
            .enumerate()
            .filter(|(_, item)| !self.done.contains(&item.key) && seen.insert(item.key.clone()))
            .collect()
    }

    fn apply(
        &mut self,
        index: usize,
        item: &WorkItem,
        outcome: ItemOutcome,
        errors: &mut dyn ErrorSink,
    ) {
        let index = index as u64;
        self.last_index = Some(self.last_index.map_or(index, |last| last.max(index)));

        match outcome {
            ItemOutcome::Succeeded { payload, attempts } => {
                self.processed += 1;
                if self.done.insert(item.key.clone()) {
                    self.results.push(ResultRecord::from_item(item, payload));
                }
                self.succeeded += 1;
                if attempts > 1 {
                    info!(event = "item_recovered", key = %item.key, attempts);
                }
            }
            failed @ ItemOutcome::Failed { .. } => self.apply_failure(&item.key, failed, errors),
        }
    }

    fn apply_failure(
        &mut self,
        key: &str,
        outcome: ItemOutcome,
        errors: &mut dyn ErrorSink,
    ) {
        let ItemOutcome::Failed { kind, reason } = outcome else {
            return;
        };
        self.processed += 1;
        self.failed += 1;
        warn!(event = "item_failed", key = %key, kind = %kind, reason = %reason);

        // The record still reaches the run log when the sink rejects it.
        let record = ErrorRecord::new(key, kind, reason);
        if let Err(err) = errors.append(&record) {
            self.unlogged_failures += 1;
            error!(
                event = "error_log_write_failed",
                key = %key,
                record = %record.to_log_line(),
                error = %err,
            );
        }
    }

    fn progress(&self, total: usize, start: Instant) -> Progress {
        Progress::new(
            self.processed,
            total,
            self.succeeded,
            self.failed,
            start.elapsed(),
        )
    }
}

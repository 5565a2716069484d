use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dataseed_batch::{
    BatchConfig, BatchError, BatchProcessor, Caller, CheckpointStore, ErrorSink, StoreError,
    StoredState,
};
use dataseed_core::{
    CallOutcome, Checkpoint, ErrorRecord, FailureKind, ResultRecord, WorkItem, WorkSource,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Caller that replays scripted outcomes per key and succeeds otherwise.
#[derive(Default)]
struct ScriptedCaller {
    scripts: Mutex<HashMap<String, VecDeque<CallOutcome>>>,
    always_transient: Vec<String>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedCaller {
    fn script(self, key: &str, outcomes: Vec<CallOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(key.to_string(), outcomes.into());
        self
    }

    fn failing(mut self, key: &str) -> Self {
        self.always_transient.push(key.to_string());
        self
    }

    fn calls_for(&self, key: &str) -> u32 {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Caller for ScriptedCaller {
    async fn call(&self, item: &WorkItem) -> CallOutcome {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(item.key.clone())
            .or_insert(0) += 1;

        if self.always_transient.contains(&item.key) {
            return CallOutcome::transient("Request timeout");
        }
        if let Some(outcome) = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&item.key)
            .and_then(VecDeque::pop_front)
        {
            return outcome;
        }
        CallOutcome::success(json!({ "description": format!("about {}", item.key) }))
    }
}

/// Snapshot of one `save` call.
#[derive(Debug, Clone)]
struct Saved {
    done: usize,
    results: usize,
    completed: bool,
}

#[derive(Default)]
struct RecordingStore {
    initial: StoredState,
    saves: Vec<Saved>,
    last: Option<(Checkpoint, Vec<ResultRecord>)>,
}

impl CheckpointStore for RecordingStore {
    fn load(&self) -> Result<StoredState, StoreError> {
        Ok(self.initial.clone())
    }

    fn save(&mut self, checkpoint: &Checkpoint, results: &[ResultRecord]) -> Result<(), StoreError> {
        self.saves.push(Saved {
            done: checkpoint.processed_keys.len(),
            results: results.len(),
            completed: checkpoint.completed,
        });
        self.last = Some((checkpoint.clone(), results.to_vec()));
        Ok(())
    }
}

struct BrokenStore;

impl CheckpointStore for BrokenStore {
    fn load(&self) -> Result<StoredState, StoreError> {
        Ok(StoredState::default())
    }

    fn save(&mut self, _checkpoint: &Checkpoint, _results: &[ResultRecord]) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        )))
    }
}

struct UnreadableSource;

impl WorkSource for UnreadableSource {
    fn items(&self) -> dataseed_core::Result<Vec<WorkItem>> {
        Err(dataseed_core::Error::WorkSource(
            "users.csv not found".to_string(),
        ))
    }
}

fn items(count: usize) -> Vec<WorkItem> {
    (1..=count)
        .map(|i| WorkItem::new(format!("item-{i}"), json!({ "index": i })))
        .collect()
}

fn fast_config(checkpoint_every: usize) -> BatchConfig {
    BatchConfig {
        max_attempts: 3,
        retry_delay_ms: 0,
        checkpoint_every,
        max_requests_per_second: None,
        concurrency: 1,
    }
}

async fn run_with(
    config: BatchConfig,
    caller: Arc<ScriptedCaller>,
    source: &dyn WorkSource,
    store: &mut RecordingStore,
) -> (dataseed_batch::RunSummary, Vec<ErrorRecord>) {
    let processor = BatchProcessor::new(config, caller).expect("valid config");
    let mut errors: Vec<ErrorRecord> = Vec::new();
    let summary = processor
        .run(source, store, &mut errors, CancellationToken::new())
        .await
        .expect("run batch");
    (summary, errors)
}

#[tokio::test]
async fn twenty_five_items_checkpoint_after_ten_twenty_and_final() {
    let caller = Arc::new(ScriptedCaller::default());
    let mut store = RecordingStore::default();

    let (summary, errors) = run_with(fast_config(10), caller, &items(25), &mut store).await;

    assert!(errors.is_empty());
    assert_eq!(summary.processed, 25);
    assert_eq!(summary.checkpoints_written, 3);
    let done: Vec<usize> = store.saves.iter().map(|s| s.done).collect();
    assert_eq!(done, vec![10, 20, 25]);
    let completed: Vec<bool> = store.saves.iter().map(|s| s.completed).collect();
    assert_eq!(completed, vec![false, false, true]);

    let (checkpoint, results) = store.last.expect("final checkpoint");
    assert_eq!(results.len(), 25);
    assert_eq!(checkpoint.processed_keys.len(), 25);
    assert_eq!(checkpoint.last_index, Some(24));
}

#[tokio::test]
async fn checkpoint_count_is_floor_plus_final() {
    let caller = Arc::new(ScriptedCaller::default().failing("item-7"));
    let mut store = RecordingStore::default();

    let (summary, _) = run_with(fast_config(5), caller, &items(23), &mut store).await;

    assert_eq!(store.saves.len(), 23 / 5 + 1);
    assert_eq!(summary.checkpoints_written, store.saves.len());
    // Each checkpoint's done set matches successes seen so far.
    let done: Vec<usize> = store.saves.iter().map(|s| s.done).collect();
    assert_eq!(done, vec![5, 9, 14, 19, 22]);
    assert!(store.saves.iter().all(|s| s.done == s.results));
}

#[tokio::test]
async fn item_failing_every_attempt_is_logged_once() {
    let caller = Arc::new(ScriptedCaller::default().failing("item-3"));
    let mut store = RecordingStore::default();

    let (summary, errors) =
        run_with(fast_config(10), Arc::clone(&caller), &items(5), &mut store).await;

    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(caller.calls_for("item-3"), 3);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key, "item-3");
    assert_eq!(errors[0].kind, FailureKind::Exhausted { attempts: 3 });

    let (checkpoint, results) = store.last.expect("final checkpoint");
    assert_eq!(results.len(), 4);
    assert_eq!(checkpoint.processed_keys.len(), 4);
    assert!(!checkpoint.processed_keys.contains("item-3"));
}

#[tokio::test]
async fn transient_failure_recovered_on_second_attempt() {
    let caller = Arc::new(ScriptedCaller::default().script(
        "item-1",
        vec![CallOutcome::transient("connection reset")],
    ));
    let mut store = RecordingStore::default();

    let (summary, errors) =
        run_with(fast_config(10), Arc::clone(&caller), &items(1), &mut store).await;

    assert!(errors.is_empty());
    assert_eq!(summary.succeeded, 1);
    assert_eq!(caller.calls_for("item-1"), 2);
    assert_eq!(store.last.expect("final").1.len(), 1);
}

#[tokio::test]
async fn permanent_rejection_is_not_retried() {
    let caller = Arc::new(ScriptedCaller::default().script(
        "item-2",
        vec![CallOutcome::permanent("User already exists")],
    ));
    let mut store = RecordingStore::default();

    let (summary, errors) =
        run_with(fast_config(10), Arc::clone(&caller), &items(3), &mut store).await;

    assert_eq!(caller.calls_for("item-2"), 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, FailureKind::Rejected);
    assert!(errors[0].to_log_line().contains("item-2: rejected: User already exists"));
}

#[tokio::test]
async fn resumes_after_prior_checkpoint() {
    let all = items(8);
    let prior: Vec<ResultRecord> = all[..3]
        .iter()
        .map(|item| ResultRecord::from_item(item, json!({ "description": "earlier" })))
        .collect();
    let done = all[..3].iter().map(|item| item.key.clone()).collect();
    let mut store = RecordingStore {
        initial: StoredState {
            checkpoint: Checkpoint::snapshot(&done, Some(2), false),
            results: prior,
        },
        ..RecordingStore::default()
    };
    let caller = Arc::new(ScriptedCaller::default());

    let (summary, _) = run_with(fast_config(10), Arc::clone(&caller), &all, &mut store).await;

    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.processed, 5);
    assert_eq!(caller.total_calls(), 5);
    assert_eq!(caller.calls_for("item-1"), 0);
    assert_eq!(summary.results, 8);
    let (checkpoint, results) = store.last.expect("final");
    assert_eq!(results.len(), 8);
    // Position of the last item in the source, not in this run's remainder.
    assert_eq!(checkpoint.last_index, Some(7));
}

#[tokio::test]
async fn results_missing_from_progress_are_not_reprocessed() {
    let all = items(4);
    let mut store = RecordingStore {
        initial: StoredState {
            checkpoint: Checkpoint::default(),
            results: vec![ResultRecord::from_item(&all[0], json!({}))],
        },
        ..RecordingStore::default()
    };
    let caller = Arc::new(ScriptedCaller::default());

    let (summary, _) = run_with(fast_config(10), Arc::clone(&caller), &all, &mut store).await;

    assert_eq!(caller.calls_for("item-1"), 0);
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.done, 4);
    assert_eq!(summary.results, 4);
}

#[tokio::test]
async fn repeated_keys_in_source_are_dispatched_once() {
    let mut source = items(3);
    source.push(WorkItem::bare("item-2"));
    let caller = Arc::new(ScriptedCaller::default());
    let mut store = RecordingStore::default();

    let (summary, _) = run_with(fast_config(10), Arc::clone(&caller), &source, &mut store).await;

    assert_eq!(caller.calls_for("item-2"), 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.results, 3);
}

#[tokio::test]
async fn concurrent_dispatch_matches_sequential_totals() {
    let caller = Arc::new(ScriptedCaller::default().failing("item-13"));
    let mut store = RecordingStore::default();
    let config = BatchConfig {
        concurrency: 4,
        ..fast_config(10)
    };

    let (summary, errors) = run_with(config, Arc::clone(&caller), &items(40), &mut store).await;

    assert_eq!(summary.processed, 40);
    assert_eq!(summary.succeeded, 39);
    assert_eq!(errors.len(), 1);
    assert_eq!(store.saves.len(), 5);
    let (checkpoint, results) = store.last.expect("final");
    assert_eq!(checkpoint.processed_keys.len(), 39);
    let mut keys: Vec<&str> = results.iter().map(|r| r.key.as_str()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 39);
}

#[tokio::test(start_paused = true)]
async fn throttle_spaces_dispatches() {
    let caller = Arc::new(ScriptedCaller::default());
    let mut store = RecordingStore::default();
    let config = BatchConfig {
        max_requests_per_second: Some(2.0),
        ..fast_config(10)
    };

    let start = tokio::time::Instant::now();
    let (summary, _) = run_with(config, caller, &items(5), &mut store).await;

    assert_eq!(summary.succeeded, 5);
    assert!(start.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn retry_delay_applies_between_attempts() {
    let caller = Arc::new(ScriptedCaller::default().failing("item-1"));
    let mut store = RecordingStore::default();
    let config = BatchConfig {
        retry_delay_ms: 5000,
        ..fast_config(10)
    };

    let start = tokio::time::Instant::now();
    let (_, errors) = run_with(config, caller, &items(1), &mut store).await;

    assert_eq!(errors.len(), 1);
    // Two waits between three attempts, none after the last.
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert!(start.elapsed() < Duration::from_secs(15));
}

/// Cancels the run the first time it sees `trigger`, then hangs.
struct CancellingCaller {
    trigger: String,
    cancel: CancellationToken,
}

#[async_trait]
impl Caller for CancellingCaller {
    async fn call(&self, item: &WorkItem) -> CallOutcome {
        if item.key == self.trigger {
            self.cancel.cancel();
            std::future::pending::<()>().await;
        }
        CallOutcome::success(json!({}))
    }
}

#[tokio::test]
async fn cancellation_flushes_completed_work() {
    let cancel = CancellationToken::new();
    let caller = Arc::new(CancellingCaller {
        trigger: "item-4".to_string(),
        cancel: cancel.clone(),
    });
    let processor = BatchProcessor::new(fast_config(10), caller).expect("valid config");
    let mut store = RecordingStore::default();
    let mut errors: Vec<ErrorRecord> = Vec::new();

    let summary = processor
        .run(&items(10), &mut store, &mut errors, cancel)
        .await
        .expect("cancelled run still returns a summary");

    assert!(summary.cancelled);
    assert_eq!(summary.processed, 3);
    assert!(errors.is_empty());
    let last = store.saves.last().expect("flushed checkpoint");
    assert_eq!(last.done, 3);
    assert!(!last.completed);
}

#[tokio::test]
async fn unreadable_work_source_is_fatal() {
    let processor = BatchProcessor::new(fast_config(10), Arc::new(ScriptedCaller::default()))
        .expect("valid config");
    let mut store = RecordingStore::default();
    let mut errors: Vec<ErrorRecord> = Vec::new();

    let result = processor
        .run(&UnreadableSource, &mut store, &mut errors, CancellationToken::new())
        .await;

    assert!(matches!(result, Err(BatchError::WorkSource(_))));
    assert!(store.saves.is_empty());
}

#[tokio::test]
async fn unwritable_store_is_fatal() {
    let processor = BatchProcessor::new(fast_config(2), Arc::new(ScriptedCaller::default()))
        .expect("valid config");
    let mut errors: Vec<ErrorRecord> = Vec::new();

    let result = processor
        .run(&items(5), &mut BrokenStore, &mut errors, CancellationToken::new())
        .await;

    assert!(matches!(result, Err(BatchError::Store(_))));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = BatchConfig {
        concurrency: 0,
        ..fast_config(10)
    };
    let result = BatchProcessor::new(config, Arc::new(ScriptedCaller::default()));
    assert!(matches!(result, Err(BatchError::InvalidConfig(_))));
}

/// Panics on `trigger`, succeeds otherwise.
struct PanickingCaller {
    trigger: String,
}

#[async_trait]
impl Caller for PanickingCaller {
    async fn call(&self, item: &WorkItem) -> CallOutcome {
        if item.key == self.trigger {
            panic!("caller blew up on {}", item.key);
        }
        CallOutcome::success(json!({}))
    }
}

#[tokio::test]
async fn caller_panic_is_recorded_as_rejected() {
    let caller = Arc::new(PanickingCaller {
        trigger: "item-2".to_string(),
    });
    let processor = BatchProcessor::new(fast_config(10), caller).expect("valid config");
    let mut store = RecordingStore::default();
    let mut errors: Vec<ErrorRecord> = Vec::new();

    let summary = processor
        .run(&items(3), &mut store, &mut errors, CancellationToken::new())
        .await
        .expect("panic stays inside the item");

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key, "item-2");
    assert_eq!(errors[0].kind, FailureKind::Rejected);
    assert_eq!(errors[0].description, "caller panicked");

    let (checkpoint, results) = store.last.expect("final checkpoint");
    assert_eq!(results.len(), 2);
    assert!(!checkpoint.processed_keys.contains("item-2"));
    assert!(checkpoint.completed);
}

struct FullDiskSink {
    attempts: usize,
}

impl ErrorSink for FullDiskSink {
    fn append(&mut self, _record: &ErrorRecord) -> std::io::Result<()> {
        self.attempts += 1;
        Err(std::io::Error::other("disk full"))
    }
}

#[tokio::test]
async fn error_sink_failure_keeps_run_and_checkpoints() {
    let caller = Arc::new(
        ScriptedCaller::default().script("item-3", vec![CallOutcome::permanent("bad email")]),
    );
    let processor = BatchProcessor::new(fast_config(10), caller).expect("valid config");
    let mut store = RecordingStore::default();
    let mut sink = FullDiskSink { attempts: 0 };

    let summary = processor
        .run(&items(5), &mut store, &mut sink, CancellationToken::new())
        .await
        .expect("sink failure is not fatal");

    assert_eq!(sink.attempts, 1);
    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.unlogged_failures, 1);

    let last = store.saves.last().expect("final checkpoint");
    assert_eq!(last.done, 4);
    assert_eq!(last.results, 4);
    assert!(last.completed);
}

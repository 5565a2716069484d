use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use dataseed_batch::{
    BatchConfig, BatchProcessor, Caller, FileErrorLog, JsonCheckpointStore, RunSummary,
};
use dataseed_core::{WorkItem, WorkSource, redact_endpoint};
use dataseed_generate::{
    ProductTitle, TitleOptions, TitlesFileSource, UsersCsvSource, generate_titles,
};
use dataseed_remote::{DescriptionAgent, DescriptionAgentConfig, Registrar, RegistrarConfig};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::CliError;
use crate::registry::write_manifest;
use crate::workspace::{RunManifest, WorkspacePaths, WorkspaceSettings};

/// Shared inputs for the batch-backed subcommands.
pub struct JobContext<'a> {
    pub paths: &'a WorkspacePaths,
    pub settings: &'a WorkspaceSettings,
    pub run_id: &'a str,
}

/// Command-line overrides for the `[batch]` settings section.
#[derive(Args, Debug, Default)]
pub struct BatchOverrides {
    /// Attempts per item, including the first.
    #[arg(long)]
    max_attempts: Option<u32>,
    /// Delay between attempts of the same item, in milliseconds.
    #[arg(long)]
    retry_delay_ms: Option<u64>,
    /// Persist progress after this many processed items.
    #[arg(long)]
    checkpoint_every: Option<usize>,
    /// Maximum requests per second.
    #[arg(long)]
    rate: Option<f64>,
    /// Requests allowed in flight at once.
    #[arg(long)]
    concurrency: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Titles JSON written by `dataseed titles`. Without it, titles are
    /// generated from --seed and --target.
    #[arg(long)]
    titles: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 10_000)]
    target: usize,
    /// Overrides `describe.endpoint`.
    #[arg(long)]
    endpoint: Option<String>,
    /// Overrides `describe.agent_id`.
    #[arg(long)]
    agent_id: Option<String>,
    #[command(flatten)]
    batch: BatchOverrides,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Users CSV with username, userMail, userPhoneNumber and password.
    #[arg(long)]
    users: PathBuf,
    /// Overrides `register.endpoint`.
    #[arg(long)]
    endpoint: Option<String>,
    #[command(flatten)]
    batch: BatchOverrides,
}

pub async fn describe(ctx: &JobContext<'_>, args: DescribeArgs) -> Result<(), CliError> {
    let settings = &ctx.settings.describe;
    let endpoint = args.endpoint.unwrap_or_else(|| settings.endpoint.clone());
    let agent = DescriptionAgent::new(DescriptionAgentConfig {
        endpoint: endpoint.clone(),
        agent_id: args.agent_id.unwrap_or_else(|| settings.agent_id.clone()),
        api_key: api_key_from_env(&settings.api_key_env)?,
        timeout: Duration::from_secs(settings.timeout_secs),
    })?;

    let source: Box<dyn WorkSource> = match args.titles {
        Some(path) => Box::new(TitlesFileSource::new(path)),
        None => {
            let titles = generate_titles(&TitleOptions {
                seed: args.seed,
                target_total: args.target,
            })?;
            let items: Vec<WorkItem> = titles.iter().map(ProductTitle::to_work_item).collect();
            Box::new(items)
        }
    };

    let config = effective_config(
        &ctx.settings.batch,
        settings.max_requests_per_second,
        &args.batch,
    );
    run_job(ctx, "describe", &endpoint, config, Arc::new(agent), source.as_ref()).await?;
    Ok(())
}

pub async fn register(ctx: &JobContext<'_>, args: RegisterArgs) -> Result<(), CliError> {
    let settings = &ctx.settings.register;
    let endpoint = args.endpoint.unwrap_or_else(|| settings.endpoint.clone());
    let registrar = Registrar::new(RegistrarConfig {
        endpoint: endpoint.clone(),
        timeout: Duration::from_secs(settings.timeout_secs),
    })?;
    let source = UsersCsvSource::new(args.users);

    let config = effective_config(
        &ctx.settings.batch,
        settings.max_requests_per_second,
        &args.batch,
    );
    run_job(ctx, "register", &endpoint, config, Arc::new(registrar), &source).await?;
    Ok(())
}

/// `[batch]` settings, then the job's own rate, then command-line flags.
fn effective_config(
    base: &BatchConfig,
    job_rate: Option<f64>,
    overrides: &BatchOverrides,
) -> BatchConfig {
    let mut config = base.clone();
    if job_rate.is_some() {
        config.max_requests_per_second = job_rate;
    }
    if let Some(value) = overrides.max_attempts {
        config.max_attempts = value;
    }
    if let Some(value) = overrides.retry_delay_ms {
        config.retry_delay_ms = value;
    }
    if let Some(value) = overrides.checkpoint_every {
        config.checkpoint_every = value;
    }
    if let Some(value) = overrides.rate {
        config.max_requests_per_second = Some(value);
    }
    if let Some(value) = overrides.concurrency {
        config.concurrency = value;
    }
    config
}

fn api_key_from_env(var: &str) -> Result<String, CliError> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            CliError::InvalidConfig(format!(
                "environment variable {var} must hold the description agent API key"
            ))
        })
}

async fn run_job(
    ctx: &JobContext<'_>,
    job: &str,
    endpoint: &str,
    config: BatchConfig,
    caller: Arc<dyn Caller>,
    source: &dyn WorkSource,
) -> Result<RunSummary, CliError> {
    let processor = BatchProcessor::new(config.clone(), caller)?;

    let state_dir = ctx.paths.job_state_dir(job);
    std::fs::create_dir_all(&state_dir)?;
    let mut store = JsonCheckpointStore::in_dir(&state_dir);
    let mut errors = FileErrorLog::open(&state_dir.join("errors.log"))?;

    let endpoint = redact_endpoint(endpoint);
    let mut manifest = RunManifest::started(
        ctx.run_id,
        job,
        endpoint.redacted,
        state_dir.display().to_string(),
        config,
    );
    write_manifest(ctx.paths, &manifest)?;
    info!(
        event = "job_started",
        job,
        endpoint = %manifest.endpoint,
        scheme = endpoint.scheme.as_deref().unwrap_or("unknown"),
        host = endpoint.host.as_deref().unwrap_or("unknown"),
        progress = %store.progress_path().display(),
        results = %store.results_path().display(),
        errors = %errors.path().display(),
    );

    let cancel = CancellationToken::new();
    let interrupt = cancel_on_ctrl_c(cancel.clone());
    let outcome = processor
        .run(source, &mut store, &mut errors, cancel)
        .await;
    interrupt.abort();

    manifest.finish(outcome.as_ref().map_err(ToString::to_string));
    write_manifest(ctx.paths, &manifest)?;

    let summary = outcome?;
    print_summary(job, &summary, &state_dir, errors.path());
    Ok(summary)
}

fn cancel_on_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!(event = "interrupt_received");
            cancel.cancel();
        }
    })
}

fn print_summary(job: &str, summary: &RunSummary, state_dir: &Path, error_log: &Path) {
    let status = if summary.cancelled {
        "interrupted"
    } else {
        "finished"
    };
    println!("{job} {status}");
    println!(
        "  items: {} total, {} already done, {} processed",
        summary.total, summary.skipped, summary.processed
    );
    println!(
        "  outcome: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    println!(
        "  state: {} done, {} results in {}",
        summary.done,
        summary.results,
        state_dir.display()
    );
    if summary.failed > 0 {
        println!("  failures logged to {}", error_log.display());
    }
    if summary.unlogged_failures > 0 {
        println!(
            "  {} failures could not be written there; see the run log",
            summary.unlogged_failures
        );
    }
    if summary.cancelled {
        println!("  rerun the same command to resume");
    }
}

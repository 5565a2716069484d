mod commands;
mod registry;
mod workspace;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use dataseed_batch::BatchError;
use dataseed_generate::GenerationError;
use dataseed_remote::RemoteError;
use thiserror::Error;

use commands::generate::{ProductsArgs, TitlesArgs, UsersArgs};
use commands::jobs::{DescribeArgs, JobContext, RegisterArgs};
use registry::init_logging;
use workspace::{CLI_VERSION, WorkspacePaths, load_or_create_settings, new_artifact_id};

#[derive(Debug, Error)]
enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] workspace::WorkspaceError),
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),
    #[error("remote client error: {0}")]
    Remote(#[from] RemoteError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "dataseed",
    version,
    about = "Generate seed datasets and push them through remote services, resumably"
)]
struct Cli {
    /// Workspace directory holding settings, logs, run manifests and job state.
    #[arg(long, global = true, default_value = ".dataseed")]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the product catalog CSV.
    Products(ProductsArgs),
    /// Write a users CSV for registration.
    Users(UsersArgs),
    /// Write product titles as JSON.
    Titles(TitlesArgs),
    /// Generate a description for every product title.
    Describe(DescribeArgs),
    /// Register every user in a users CSV.
    Register(RegisterArgs),
}

impl Command {
    fn kind(&self) -> &'static str {
        match self {
            Command::Products(_) => "products",
            Command::Users(_) => "users",
            Command::Titles(_) => "titles",
            Command::Describe(_) => "describe",
            Command::Register(_) => "register",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let paths = WorkspacePaths::new(cli.workspace);
    paths.ensure_dirs()?;
    let settings = load_or_create_settings(&paths)?;

    let kind = cli.command.kind();
    let run_id = new_artifact_id(kind);
    init_logging(&paths.log_path(&run_id))?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = kind,
        cli_version = CLI_VERSION,
        workspace = %paths.root.display(),
    );
    let timer = Instant::now();

    let ctx = JobContext {
        paths: &paths,
        settings: &settings,
        run_id: &run_id,
    };
    let result = match cli.command {
        Command::Products(args) => commands::generate::products(&paths, args),
        Command::Users(args) => commands::generate::users(&paths, args),
        Command::Titles(args) => commands::generate::titles(&paths, args),
        Command::Describe(args) => commands::jobs::describe(&ctx, args).await,
        Command::Register(args) => commands::jobs::register(&ctx, args).await,
    };

    let duration_ms = timer.elapsed().as_millis();
    match &result {
        Ok(()) => tracing::info!(event = "run_finished", status = "success", duration_ms),
        Err(err) => tracing::error!(
            event = "run_finished",
            status = "error",
            error = %err,
            duration_ms
        ),
    }

    result
}

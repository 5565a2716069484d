use std::path::PathBuf;

use clap::Args;
use dataseed_generate::output::{write_products_csv, write_titles_json, write_users_csv};
use dataseed_generate::{
    CatalogOptions, TitleOptions, UserOptions, UserStrategy, generate_catalog, generate_titles,
    generate_users,
};
use tracing::info;

use crate::CliError;
use crate::workspace::WorkspacePaths;

#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Output CSV path (default: <workspace>/out/products.csv).
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Multiplier on the default 50,000-row distribution.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Output CSV path (default: <workspace>/out/users.csv).
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = 5000)]
    count: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Guarantee unique usernames instead of index-derived ones.
    #[arg(long, default_value_t = false)]
    unique: bool,
}

#[derive(Args, Debug)]
pub struct TitlesArgs {
    /// Output JSON path (default: <workspace>/out/titles.json).
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Approximate number of titles before de-duplication.
    #[arg(long, default_value_t = 10_000)]
    target: usize,
}

pub fn products(paths: &WorkspacePaths, args: ProductsArgs) -> Result<(), CliError> {
    let out = args.out.unwrap_or_else(|| paths.out_dir.join("products.csv"));
    let products = generate_catalog(&CatalogOptions {
        seed: args.seed,
        scale: args.scale,
    })?;
    let bytes = write_products_csv(&out, &products)?;

    info!(
        event = "products_written",
        path = %out.display(),
        rows = products.len(),
        bytes,
        seed = args.seed,
    );
    println!("wrote {} products to {}", products.len(), out.display());
    Ok(())
}

pub fn users(paths: &WorkspacePaths, args: UsersArgs) -> Result<(), CliError> {
    let out = args.out.unwrap_or_else(|| paths.out_dir.join("users.csv"));
    let strategy = if args.unique {
        UserStrategy::Unique
    } else {
        UserStrategy::Indexed
    };
    let users = generate_users(&UserOptions {
        seed: args.seed,
        count: args.count,
        strategy,
    })?;
    let bytes = write_users_csv(&out, &users)?;

    info!(
        event = "users_written",
        path = %out.display(),
        rows = users.len(),
        bytes,
        strategy = ?strategy,
        seed = args.seed,
    );
    println!("wrote {} users to {}", users.len(), out.display());
    Ok(())
}

pub fn titles(paths: &WorkspacePaths, args: TitlesArgs) -> Result<(), CliError> {
    let out = args.out.unwrap_or_else(|| paths.out_dir.join("titles.json"));
    let titles = generate_titles(&TitleOptions {
        seed: args.seed,
        target_total: args.target,
    })?;
    write_titles_json(&out, &titles)?;

    info!(
        event = "titles_written",
        path = %out.display(),
        titles = titles.len(),
        seed = args.seed,
    );
    println!("wrote {} titles to {}", titles.len(), out.display());
    Ok(())
}

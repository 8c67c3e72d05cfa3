// Tracker command line entry point
use clap::Parser;
use shared::{ExpiryStatus, FoodCategory, StorageLocation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracker::app::{self, RunOptions};
use tracker::data::inventory_store::ItemFilter;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Expiry and budget report for a household food inventory.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Inventory CSV file
    inventory: PathBuf,

    /// Expenses CSV file for the monthly budget summary
    #[arg(short, long)]
    expenses: Option<PathBuf>,

    /// Settings JSON file; the built-in defaults are used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only show items in this state (expired, expires-today, expires-soon, fresh)
    #[arg(short, long)]
    status: Option<ExpiryStatus>,

    #[arg(long)]
    category: Option<FoodCategory>,

    #[arg(long)]
    location: Option<StorageLocation>,

    #[arg(short, long, default_value_t = 1)]
    page: usize,
}

fn main() -> ExitCode {
    // Logs go to stderr so the report on stdout can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = RunOptions {
        inventory: args.inventory,
        expenses: args.expenses,
        config: args.config,
        filter: ItemFilter {
            status: args.status,
            category: args.category,
            location: args.location,
        },
        page: args.page,
    };

    match app::run(&options, shared::dates::now()) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

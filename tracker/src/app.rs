// Loads the inputs named on the command line and renders the reports.
use crate::config::settings::TrackerSettings;
use crate::data::inventory_csv::InventoryCsvParser;
use crate::data::inventory_store::{InventoryStore, ItemFilter};
use crate::error::TrackerError;
use crate::report::{BudgetSummary, ExpiryReport};
use chrono::NaiveDateTime;
use shared::{format_duration, format_file_size};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub inventory: PathBuf,
    pub expenses: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub filter: ItemFilter,
    pub page: usize,
}

pub fn load_settings(config: Option<&Path>) -> Result<TrackerSettings, TrackerError> {
    match config {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            TrackerSettings::from_file(path)
        }
        None => TrackerSettings::load_default(),
    }
}

/// Full text output for one invocation, evaluated at `now`.
pub fn run(options: &RunOptions, now: NaiveDateTime) -> Result<String, TrackerError> {
    let settings = load_settings(options.config.as_deref())?;
    debug!(?settings, "Settings loaded");

    let parser = InventoryCsvParser::new(settings.delimiter_byte(), settings.currency);

    let started = Instant::now();
    let items = parser
        .load_items_from_csv(&options.inventory)
        .map_err(TrackerError::from_loader)?;
    info!(
        "Loaded {} inventory rows from {} ({}) in {}",
        items.len(),
        options.inventory.display(),
        file_size(&options.inventory),
        format_duration(started.elapsed().as_secs_f64() * 1000.0)
    );

    let mut store = InventoryStore::new(settings.expiry_warning_days);
    store.add_items(items)?;

    let page = options.page.max(1);
    let mut output = ExpiryReport::build(&store, &options.filter, &settings, page, now).render(&settings);

    if let Some(path) = &options.expenses {
        let expenses = parser
            .load_expenses_from_csv(path)
            .map_err(TrackerError::from_loader)?;
        info!("Loaded {} expenses from {} ({})", expenses.len(), path.display(), file_size(path));
        output.push('\n');
        output.push_str(&BudgetSummary::from_expenses(&expenses, &settings, now).render(&settings));
    }
    Ok(output)
}

fn file_size(path: &Path) -> String {
    fs::metadata(path)
        .map(|meta| format_file_size(meta.len() as f64, 1))
        .unwrap_or_else(|_| "size unknown".to_string())
}

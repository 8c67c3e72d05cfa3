// Tracker settings: display locale, currency, expiry window and budget.
// Loaded from the embedded default JSON or from a user file; missing keys take
// the defaults from `shared::constants`.
use crate::error::TrackerError;
use serde::Deserialize;
use shared::{
    Currency, BUDGET_ALERT_THRESHOLD_PERCENT, DEFAULT_BUDGET_LIMIT, DEFAULT_CURRENCY, DEFAULT_LOCALE,
    EXPIRY_WARNING_DAYS, PAGINATION_SIZE,
};
use std::fs;
use std::path::Path;

const DEFAULT_SETTINGS_JSON: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerSettings {
    pub locale: String,
    pub currency: Currency,
    pub expiry_warning_days: i64,
    pub budget_limit: f64,
    // Percentage of the budget at which the summary raises an alert.
    pub budget_alert_threshold: f64,
    pub csv_delimiter: char,
    pub page_size: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings {
            locale: DEFAULT_LOCALE.to_string(),
            currency: DEFAULT_CURRENCY,
            expiry_warning_days: EXPIRY_WARNING_DAYS,
            budget_limit: DEFAULT_BUDGET_LIMIT,
            budget_alert_threshold: BUDGET_ALERT_THRESHOLD_PERCENT,
            csv_delimiter: ';',
            page_size: PAGINATION_SIZE,
        }
    }
}

impl TrackerSettings {
    /// Settings shipped with the binary.
    pub fn load_default() -> Result<Self, TrackerError> {
        Self::from_json(DEFAULT_SETTINGS_JSON)
    }

    pub fn from_file(path: &Path) -> Result<Self, TrackerError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let settings: TrackerSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if !self.budget_limit.is_finite() || self.budget_limit <= 0.0 {
            return Err(TrackerError::ConfigError(format!(
                "budget_limit must be a positive number, got {}",
                self.budget_limit
            )));
        }
        if !(0.0..=100.0).contains(&self.budget_alert_threshold) {
            return Err(TrackerError::ConfigError(format!(
                "budget_alert_threshold must be between 0 and 100, got {}",
                self.budget_alert_threshold
            )));
        }
        if self.expiry_warning_days < 0 {
            return Err(TrackerError::ConfigError(format!(
                "expiry_warning_days cannot be negative, got {}",
                self.expiry_warning_days
            )));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(TrackerError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        if self.page_size == 0 {
            return Err(TrackerError::ConfigError("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The delimiter as the byte the csv reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees an ASCII delimiter.
        self.csv_delimiter as u8
    }
}

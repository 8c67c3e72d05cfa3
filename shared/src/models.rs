use crate::constants::{Currency, ExpiryStatus, FoodCategory, StorageLocation, TransactionSource};
use crate::dates;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub category: FoodCategory,
    pub location: StorageLocation,
    pub quantity: f64,
    pub unit_price: f64,
    pub currency: Currency,
    // Kept as entered; unparsable dates classify as fresh.
    pub expiry_date: Option<String>,
    pub barcode: Option<String>,
}

impl InventoryItem {
    pub fn total_value(&self) -> f64 {
        self.quantity * self.unit_price
    }

    pub fn expiry_status_at(&self, now: NaiveDateTime, warning_days: i64) -> ExpiryStatus {
        dates::expiry_status_at(self.expiry_date.as_deref(), now, warning_days)
    }

    pub fn days_until_expiry_at(&self, now: NaiveDateTime) -> Option<i64> {
        // Items without a usable date have no countdown rather than 0 days.
        if dates::is_valid_date(self.expiry_date.as_deref()) {
            Some(dates::days_until_expiry_at(self.expiry_date.as_deref(), now))
        } else {
            None
        }
    }
}

/// A single household spending record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub source: TransactionSource,
}

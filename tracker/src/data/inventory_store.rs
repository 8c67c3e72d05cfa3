// In-memory inventory, with filtering by expiry status, category and location.
use crate::error::TrackerError;
use chrono::NaiveDateTime;
use shared::models::InventoryItem;
use shared::{Currency, ExpiryStatus, FoodCategory, StorageLocation};
use std::collections::BTreeMap;

/// Criteria for [`InventoryStore::filter`]; `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub status: Option<ExpiryStatus>,
    pub category: Option<FoodCategory>,
    pub location: Option<StorageLocation>,
}

pub struct InventoryStore {
    items: Vec<InventoryItem>,
    warning_days: i64,
}

impl InventoryStore {
    pub fn new(warning_days: i64) -> Self {
        InventoryStore {
            items: Vec::new(),
            warning_days,
        }
    }

    /// Adds items, merging entries that describe the same stock (same name,
    /// location and expiry date) by summing their quantities. Nothing is added
    /// when any item is invalid.
    pub fn add_items(&mut self, new_items: Vec<InventoryItem>) -> Result<(), TrackerError> {
        for item in &new_items {
            if !item.quantity.is_finite() || item.quantity <= 0.0 {
                return Err(TrackerError::StoreError(format!(
                    "Item '{}' has an invalid quantity: {}",
                    item.name, item.quantity
                )));
            }
            if !item.unit_price.is_finite() || item.unit_price < 0.0 {
                return Err(TrackerError::StoreError(format!(
                    "Item '{}' has an invalid unit price: {}",
                    item.name, item.unit_price
                )));
            }
        }

        for item in new_items {
            match self.items.iter_mut().find(|existing| Self::same_stock(existing, &item)) {
                Some(existing) => existing.quantity += item.quantity,
                None => self.items.push(item),
            }
        }
        Ok(())
    }

    fn same_stock(a: &InventoryItem, b: &InventoryItem) -> bool {
        a.name.eq_ignore_ascii_case(&b.name)
            && a.location == b.location
            && a.expiry_date == b.expiry_date
            && a.currency == b.currency
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn warning_days(&self) -> i64 {
        self.warning_days
    }

    /// Matching items, soonest expiry first; items without a usable date last.
    pub fn filter(&self, filter: &ItemFilter, now: NaiveDateTime) -> Vec<&InventoryItem> {
        let mut matching: Vec<&InventoryItem> = self
            .items
            .iter()
            .filter(|item| filter.category.map_or(true, |c| item.category == c))
            .filter(|item| filter.location.map_or(true, |l| item.location == l))
            .filter(|item| {
                filter
                    .status
                    .map_or(true, |s| item.expiry_status_at(now, self.warning_days) == s)
            })
            .collect();

        matching.sort_by_key(|item| (item.days_until_expiry_at(now).unwrap_or(i64::MAX), item.name.to_lowercase()));
        matching
    }

    /// Number of items in each expiry state, in `ExpiryStatus::ALL` order.
    pub fn status_counts(&self, now: NaiveDateTime) -> [(ExpiryStatus, usize); 4] {
        ExpiryStatus::ALL.map(|status| {
            let count = self
                .items
                .iter()
                .filter(|item| item.expiry_status_at(now, self.warning_days) == status)
                .count();
            (status, count)
        })
    }

    pub fn total_value_by_currency(&self) -> BTreeMap<&'static str, (Currency, f64)> {
        let mut totals = BTreeMap::new();
        for item in &self.items {
            let entry = totals.entry(item.currency.code()).or_insert((item.currency, 0.0));
            entry.1 += item.total_value();
        }
        totals
    }
}

/// One page of `items` (1-based), or an empty slice past the end.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(shared::EXPIRY_WARNING_DAYS)
    }
}

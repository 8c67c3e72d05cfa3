// Text reports built on the shared formatting and date utilities.
//
// `ExpiryReport` lists stock with its expiry badge and a human phrase for
// when it goes off; `BudgetSummary` compares this month's spending with
// the configured budget.

use crate::config::settings::TrackerSettings;
use crate::data::inventory_store::{page_count, paginate, InventoryStore, ItemFilter};
use chrono::{NaiveDateTime, NaiveTime};
use shared::models::{Expense, InventoryItem};
use shared::{
    current_month_range_at, format_compact_number, format_currency, format_date, format_number, format_percentage,
    is_within_last_days_at, relative_time_at, Currency, CurrencyOptions, DateFormat, DateRange, ExpiryStatus,
    FoodCategory, StorageLocation,
};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub name: String,
    pub category: FoodCategory,
    pub location: StorageLocation,
    pub status: ExpiryStatus,
    pub expiry: String,
    pub when: Option<String>,
    pub value: String,
}

impl ReportLine {
    fn from_item(item: &InventoryItem, settings: &TrackerSettings, now: NaiveDateTime) -> Self {
        let status = item.expiry_status_at(now, settings.expiry_warning_days);
        let expiry = match item.expiry_date.as_deref() {
            Some(date) => format_date(date, DateFormat::Medium),
            None => "no expiry date".to_string(),
        };
        let when = item
            .days_until_expiry_at(now)
            .and(item.expiry_date.as_deref())
            .map(|date| relative_time_at(date, now));
        let options = CurrencyOptions::new(item.currency).with_locale(settings.locale.as_str());

        ReportLine {
            name: item.name.clone(),
            category: item.category,
            location: item.location,
            status,
            expiry,
            when,
            value: format_currency(item.total_value(), &options),
        }
    }

    pub fn render(&self) -> String {
        let mut line = format!(
            "{} {} ({} {}) [{}] {}",
            self.category.icon(),
            self.name,
            self.location.icon(),
            self.location.label(),
            self.status.label(),
            self.expiry
        );
        if let Some(when) = &self.when {
            line.push_str(", ");
            line.push_str(when);
        }
        line.push_str("  ");
        line.push_str(&self.value);
        line
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryReport {
    pub generated_at: NaiveDateTime,
    pub counts: [(ExpiryStatus, usize); 4],
    pub lines: Vec<ReportLine>,
    pub total_matching: usize,
    pub page: usize,
    pub pages: usize,
    pub stock_units: f64,
}

impl ExpiryReport {
    pub fn build(
        store: &InventoryStore,
        filter: &ItemFilter,
        settings: &TrackerSettings,
        page: usize,
        now: NaiveDateTime,
    ) -> Self {
        let matching = store.filter(filter, now);
        let lines = paginate(&matching, page, settings.page_size)
            .iter()
            .map(|item| ReportLine::from_item(item, settings, now))
            .collect();

        ExpiryReport {
            generated_at: now,
            counts: store.status_counts(now),
            lines,
            total_matching: matching.len(),
            page,
            pages: page_count(matching.len(), settings.page_size),
            stock_units: store.items().iter().map(|i| i.quantity).sum(),
        }
    }

    pub fn render(&self, settings: &TrackerSettings) -> String {
        let summary: Vec<String> = self
            .counts
            .iter()
            .map(|(status, count)| format!("{}: {}", status.label(), count))
            .collect();

        let mut out = format!(
            "Inventory report, {} {}\n  {}\n  Units in stock: {}\n\n",
            format_date(self.generated_at, DateFormat::Full),
            format_date(self.generated_at, DateFormat::Time),
            summary.join(" · "),
            format_number(self.stock_units, &settings.locale)
        );

        if self.lines.is_empty() {
            out.push_str("No matching items.\n");
        }
        for line in &self.lines {
            out.push_str(&line.render());
            out.push('\n');
        }

        if self.pages > 1 {
            out.push_str(&format!(
                "\nPage {} of {} ({} items)\n",
                self.page, self.pages, self.total_matching
            ));
        }
        out
    }
}

/// This month's spending against the budget, in the settings' currency.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub currency: Currency,
    pub limit: f64,
    pub spent: f64,
    pub spent_last_week: f64,
    pub period: DateRange,
    pub transactions: usize,
    // Expenses in the period recorded in another currency; not converted.
    pub skipped: usize,
}

impl BudgetSummary {
    pub fn from_expenses(expenses: &[Expense], settings: &TrackerSettings, now: NaiveDateTime) -> Self {
        let period = current_month_range_at(now);
        let mut summary = BudgetSummary {
            currency: settings.currency,
            limit: settings.budget_limit,
            spent: 0.0,
            spent_last_week: 0.0,
            period,
            transactions: 0,
            skipped: 0,
        };

        for expense in expenses {
            let moment = expense.date.and_time(NaiveTime::MIN);
            if !period.contains(moment) {
                continue;
            }
            if expense.currency != settings.currency {
                summary.skipped += 1;
                continue;
            }
            summary.spent += expense.amount;
            summary.transactions += 1;
            if is_within_last_days_at(moment, 7, now) {
                summary.spent_last_week += expense.amount;
            }
        }

        if summary.skipped > 0 {
            warn!(
                skipped = summary.skipped,
                currency = %settings.currency,
                "Expenses in other currencies were left out of the budget"
            );
        }
        summary
    }

    /// Share of the budget spent, as a fraction.
    pub fn used_ratio(&self) -> f64 {
        self.spent / self.limit
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    pub fn is_alert(&self, threshold_percent: f64) -> bool {
        self.used_ratio() * 100.0 >= threshold_percent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.limit
    }

    pub fn render(&self, settings: &TrackerSettings) -> String {
        let options = CurrencyOptions::new(self.currency).with_locale(settings.locale.as_str());
        let money = |amount: f64| format_currency(amount, &options);

        let mut out = format!(
            "Budget for {}: {} of {} ({})\n  {} transactions, {} in the last 7 days\n",
            self.period.start.format("%B %Y"),
            money(self.spent),
            money(self.limit),
            format_percentage(self.used_ratio(), 0),
            format_compact_number(self.transactions as f64, &settings.locale),
            money(self.spent_last_week)
        );

        let status = if self.is_over_budget() {
            format!("  ⚠ Over budget by {}\n", money(-self.remaining()))
        } else if self.is_alert(settings.budget_alert_threshold) {
            format!(
                "  ⚠ {} of the budget used, {} left\n",
                format_percentage(self.used_ratio(), 0),
                money(self.remaining())
            )
        } else {
            format!("  {} left\n", money(self.remaining()))
        };
        out.push_str(&status);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::TransactionSource;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn expense(day: u32, month: u32, amount: f64, currency: Currency) -> Expense {
        Expense {
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            description: "shop".to_string(),
            amount,
            currency,
            source: TransactionSource::Receipt,
        }
    }

    fn milk(expiry: Option<&str>) -> InventoryItem {
        InventoryItem {
            name: "Milk".to_string(),
            category: FoodCategory::Dairy,
            location: StorageLocation::Fridge,
            quantity: 2.0,
            unit_price: 1.15,
            currency: Currency::Gbp,
            expiry_date: expiry.map(str::to_string),
            barcode: None,
        }
    }

    #[test]
    fn test_report_line_for_dated_item() {
        let line = ReportLine::from_item(&milk(Some("2024-06-18")), &TrackerSettings::default(), at(2024, 6, 15));
        assert_eq!(line.status, ExpiryStatus::ExpiresSoon);
        assert_eq!(line.expiry, "18 Jun 2024");
        assert_eq!(line.when.as_deref(), Some("in 3 days"));
        assert_eq!(line.value, "£2.30");
        assert_eq!(line.render(), "🥛 Milk (❄️ Fridge) [Expires soon] 18 Jun 2024, in 3 days  £2.30");
    }

    #[test]
    fn test_report_line_for_undated_and_unparsable_items() {
        let settings = TrackerSettings::default();
        let undated = ReportLine::from_item(&milk(None), &settings, at(2024, 6, 15));
        assert_eq!(undated.status, ExpiryStatus::Fresh);
        assert_eq!(undated.expiry, "no expiry date");
        assert_eq!(undated.when, None);

        let garbled = ReportLine::from_item(&milk(Some("next tuesday")), &settings, at(2024, 6, 15));
        assert_eq!(garbled.status, ExpiryStatus::Fresh);
        assert_eq!(garbled.expiry, "Invalid date");
        assert_eq!(garbled.when, None);
    }

    #[test]
    fn test_expiry_report_paginates() {
        let mut store = InventoryStore::new(7);
        let items = (1..=5)
            .map(|i| {
                let mut item = milk(Some(&format!("2024-06-{:02}", 15 + i)));
                item.name = format!("Item {}", i);
                item
            })
            .collect();
        store.add_items(items).unwrap();

        let settings = TrackerSettings {
            page_size: 2,
            ..TrackerSettings::default()
        };
        let report = ExpiryReport::build(&store, &ItemFilter::default(), &settings, 3, at(2024, 6, 15));
        assert_eq!(report.total_matching, 5);
        assert_eq!(report.pages, 3);
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].name, "Item 5");
        assert_eq!(report.stock_units, 10.0);

        let text = report.render(&settings);
        assert!(text.starts_with("Inventory report, Saturday, 15 June 2024 12:00\n"));
        assert!(text.contains("Expires soon: 5"));
        assert!(text.contains("Units in stock: 10"));
        assert!(text.contains("Page 3 of 3 (5 items)"));
    }

    #[test]
    fn test_budget_summary_counts_current_month_only() {
        let expenses = vec![
            expense(2, 6, 100.0, Currency::Gbp),
            expense(12, 6, 50.0, Currency::Gbp),
            expense(28, 5, 75.0, Currency::Gbp),
            expense(10, 6, 20.0, Currency::Eur),
        ];
        let summary = BudgetSummary::from_expenses(&expenses, &TrackerSettings::default(), at(2024, 6, 15));
        assert_eq!(summary.spent, 150.0);
        assert_eq!(summary.spent_last_week, 50.0);
        assert_eq!(summary.transactions, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.remaining(), 250.0);
        assert!(!summary.is_alert(80.0));

        let text = summary.render(&TrackerSettings::default());
        assert!(text.starts_with("Budget for June 2024: £150.00 of £400.00 (38%)"));
        assert!(text.contains("2 transactions, £50.00 in the last 7 days"));
        assert!(text.contains("£250.00 left"));
    }

    #[test]
    fn test_budget_summary_alert_and_overspend() {
        let settings = TrackerSettings::default();
        let near = BudgetSummary::from_expenses(&[expense(3, 6, 320.0, Currency::Gbp)], &settings, at(2024, 6, 15));
        assert!(near.is_alert(settings.budget_alert_threshold));
        assert!(!near.is_over_budget());
        assert!(near.render(&settings).contains("⚠ 80% of the budget used, £80.00 left"));

        let over = BudgetSummary::from_expenses(&[expense(3, 6, 450.0, Currency::Gbp)], &settings, at(2024, 6, 15));
        assert!(over.is_over_budget());
        assert!(over.render(&settings).contains("⚠ Over budget by £50.00"));
    }
}

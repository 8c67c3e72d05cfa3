use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Expense, InventoryItem};
use shared::{
    dates, is_positive_number, is_valid_barcode, Currency, FoodCategory, StorageLocation, TransactionSource,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

// Inventory header: name;category;location;quantity;unit_price;currency;expiry_date;barcode
// Example row:      Milk;dairy;fridge;2;1,15;GBP;2024-06-18;5000112637922
//
// Expense header:   date;description;amount;currency;source
// Example row:      2024-06-02;Weekly shop;64.20;GBP;receipt
//
// currency, expiry_date, barcode and source may be absent or empty.
pub struct InventoryCsvParser {
    delimiter: u8,
    default_currency: Currency,
}

impl InventoryCsvParser {
    pub fn new(delimiter: u8, default_currency: Currency) -> Self {
        Self {
            delimiter,
            default_currency,
        }
    }

    pub fn load_items_from_csv(&self, file_path: &Path) -> Result<Vec<InventoryItem>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open inventory file '{}'", file_path.display()))?;
        self.read_items(BufReader::new(file))
    }

    pub fn load_expenses_from_csv(&self, file_path: &Path) -> Result<Vec<Expense>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open expenses file '{}'", file_path.display()))?;
        self.read_expenses(BufReader::new(file))
    }

    pub fn read_items<R: Read>(&self, reader: R) -> Result<Vec<InventoryItem>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut items = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let name = Self::required(&record, &headers, "name", line)?;
            let category = Self::required(&record, &headers, "category", line)?
                .parse::<FoodCategory>()
                .map_err(|e| anyhow!("Error parsing 'category' at line {}: {}", line, e))?;
            let location = Self::required(&record, &headers, "location", line)?
                .parse::<StorageLocation>()
                .map_err(|e| anyhow!("Error parsing 'location' at line {}: {}", line, e))?;
            let quantity = Self::parse_amount(Self::required(&record, &headers, "quantity", line)?)
                .and_then(|q| {
                    if q > 0.0 {
                        Ok(q)
                    } else {
                        Err(anyhow!("quantity must be greater than zero"))
                    }
                })
                .map_err(|e| anyhow!("Error parsing 'quantity' at line {}: {}", line, e))?;
            let unit_price = Self::parse_amount(Self::required(&record, &headers, "unit_price", line)?)
                .map_err(|e| anyhow!("Error parsing 'unit_price' at line {}: {}", line, e))?;
            let currency = self.currency(&record, &headers, line)?;

            let expiry_date = Self::optional(&record, &headers, "expiry_date").map(str::to_string);
            if let Some(date) = &expiry_date {
                if !dates::is_valid_date(date) {
                    warn!(line, item = %name, expiry_date = %date, "Unparsable expiry date, item will show as fresh");
                }
            }

            let barcode = match Self::optional(&record, &headers, "barcode") {
                Some(code) if is_valid_barcode(code) => Some(code.to_string()),
                Some(code) => {
                    warn!(line, item = %name, barcode = %code, "Ignoring malformed barcode");
                    None
                }
                None => None,
            };

            items.push(InventoryItem {
                name: name.to_string(),
                category,
                location,
                quantity,
                unit_price,
                currency,
                expiry_date,
                barcode,
            });
        }
        Ok(items)
    }

    pub fn read_expenses<R: Read>(&self, reader: R) -> Result<Vec<Expense>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut expenses = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let date_str = Self::required(&record, &headers, "date", line)?;
            let date = dates::parse_date_safe(date_str)
                .map(|d| d.date())
                .ok_or_else(|| anyhow!("Error parsing 'date' at line {}: '{}' is not a date", line, date_str))?;
            let description = Self::required(&record, &headers, "description", line)?;
            let amount = Self::required(&record, &headers, "amount", line)?
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|a| a.is_finite())
                .ok_or_else(|| anyhow!("Error parsing 'amount' at line {}", line))?;
            let currency = self.currency(&record, &headers, line)?;
            let source = match Self::optional(&record, &headers, "source") {
                Some(s) => s
                    .parse::<TransactionSource>()
                    .map_err(|e| anyhow!("Error parsing 'source' at line {}: {}", line, e))?,
                None => TransactionSource::Manual,
            };

            expenses.push(Expense {
                date,
                description: description.to_string(),
                amount,
                currency,
                source,
            });
        }
        Ok(expenses)
    }

    fn currency(&self, record: &StringRecord, headers: &StringRecord, line: usize) -> Result<Currency> {
        match Self::optional(record, headers, "currency") {
            Some(code) => code
                .parse::<Currency>()
                .map_err(|e| anyhow!("Error parsing 'currency' at line {}: {}", line, e)),
            None => Ok(self.default_currency),
        }
    }

    // Accepts "1.5" and "1,5"; the value must have the positive number shape.
    fn parse_amount(s: &str) -> Result<f64> {
        let normalized = s.replace(',', ".");
        if !is_positive_number(&normalized) {
            return Err(anyhow!("'{}' is not a positive number", s));
        }
        normalized
            .parse::<f64>()
            .map_err(|e| anyhow!("Failed to parse number '{}': {}", s, e))
    }

    fn required<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::optional(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    // Field by header name (case-insensitive); empty cells count as missing.
    fn optional<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
            .filter(|value| !value.is_empty())
    }
}

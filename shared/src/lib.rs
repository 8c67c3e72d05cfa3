// Utility layer shared by the inventory, recipe and budget views.
// `constants`, `dates` and `formatting` are the core; this root re-exports
// them as one namespace so callers can write `shared::format_currency(...)`.

pub mod constants;
pub mod dates;
pub mod error;
pub mod formatting;
pub mod locale;
pub mod models;
pub mod validation;

pub use constants::*;
pub use dates::{
    current_month_range_at, days_until_expiry_at, expiry_status_at, format_date, format_date_tag,
    get_current_month_range, get_days_until_expiry, get_expiry_status, get_expiry_status_with_threshold,
    get_last_n_days_range, get_relative_time, get_today_iso, is_after_date, is_before_date, is_valid_date,
    is_within_last_days, is_within_last_days_at, last_n_days_range_at, parse_date_safe, relative_time_at,
    to_iso_date_string, DateInput, DateRange,
};
pub use error::{FormatError, UnknownValueError};
pub use formatting::{
    format_compact_number, format_compact_number_with, format_currency, format_currency_with, format_duration,
    format_file_size, format_number, format_number_with, format_percentage, get_currency_symbol, CurrencyOptions,
    Rendered,
};
pub use locale::{LocaleFormatter, NumberFormatter};
pub use validation::{is_positive_number, is_valid_barcode, is_valid_email};

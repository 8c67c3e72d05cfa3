// Number, currency, size and duration formatting.
//
// Every public function is total: non-finite or otherwise unusable input maps
// to a fixed default string, and failures of the formatting engine are logged
// and replaced with a manually built fallback. Nothing here panics or returns
// an error to the caller.
//
// The `*_with` variants take the engine explicitly and return a `Rendered`,
// which records which path produced the string.

use crate::constants::{Currency, DEFAULT_CURRENCY, DEFAULT_LOCALE};
use crate::locale::{LocaleFormatter, NumberFormatter, MAX_FRACTION_DIGITS};
use std::fmt;
use tracing::warn;

const FILE_SIZE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Outcome of a formatting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Produced by the formatting engine.
    Localized(String),
    /// The documented default for unusable input (NaN, infinity, negative sizes...).
    Default(String),
    /// Built by hand after the engine failed.
    Fallback(String),
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Localized(s) | Rendered::Default(s) | Rendered::Fallback(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Rendered::Localized(s) | Rendered::Default(s) | Rendered::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Rendered> for String {
    fn from(rendered: Rendered) -> Self {
        rendered.into_string()
    }
}

/// Options for [`format_currency`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyOptions {
    pub currency: Currency,
    pub locale: String,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY,
            locale: DEFAULT_LOCALE.to_string(),
            min_fraction_digits: 2,
            max_fraction_digits: 2,
        }
    }
}

impl CurrencyOptions {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_fraction_digits(mut self, min: usize, max: usize) -> Self {
        self.min_fraction_digits = min;
        self.max_fraction_digits = max;
        self
    }
}

// --- Currency ---

/// Formats `amount` as a localized currency string, e.g. `"$1,234.56"`.
///
/// Non-finite amounts render as the currency symbol followed by `0.00`.
/// Fraction digit counts are capped at [`MAX_FRACTION_DIGITS`].
pub fn format_currency(amount: f64, options: &CurrencyOptions) -> String {
    format_currency_with(&LocaleFormatter, amount, options).into_string()
}

pub fn format_currency_with<F: NumberFormatter + ?Sized>(
    formatter: &F,
    amount: f64,
    options: &CurrencyOptions,
) -> Rendered {
    let symbol = options.currency.symbol();
    if !amount.is_finite() {
        return Rendered::Default(format!("{}0.00", symbol));
    }

    let min_fraction = options.min_fraction_digits.min(MAX_FRACTION_DIGITS);
    let max_fraction = options.max_fraction_digits.min(MAX_FRACTION_DIGITS);
    match formatter.format_currency(amount, options.currency, &options.locale, min_fraction, max_fraction) {
        Ok(s) => Rendered::Localized(s),
        Err(err) => {
            warn!(
                error = %err,
                currency = %options.currency,
                locale = %options.locale,
                "Currency formatting failed, using fallback"
            );
            Rendered::Fallback(format!("{}{:.*}", symbol, max_fraction, amount))
        }
    }
}

/// Display symbol for a currency code; unknown codes are returned unchanged.
pub fn get_currency_symbol(code: &str) -> String {
    code.parse::<Currency>()
        .map(|c| c.symbol().to_string())
        .unwrap_or_else(|_| code.to_string())
}

// --- Numbers ---

/// Thousands-grouped number with up to three fraction digits.
pub fn format_number(value: f64, locale: &str) -> String {
    format_number_with(&LocaleFormatter, value, locale).into_string()
}

pub fn format_number_with<F: NumberFormatter + ?Sized>(formatter: &F, value: f64, locale: &str) -> Rendered {
    if !value.is_finite() {
        return Rendered::Default("0".to_string());
    }
    match formatter.format_decimal(value, locale, 0, 3) {
        Ok(s) => Rendered::Localized(s),
        Err(err) => {
            warn!(error = %err, locale, "Number formatting failed, using fallback");
            Rendered::Fallback(value.to_string())
        }
    }
}

/// `0.1234` with two decimals becomes `"12.34%"`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    let percent = value * 100.0;
    if !percent.is_finite() {
        return "0%".to_string();
    }
    format!("{:.*}%", decimals.min(MAX_FRACTION_DIGITS), percent)
}

/// Abbreviated number such as `"1.2K"` or `"3.4M"`.
pub fn format_compact_number(value: f64, locale: &str) -> String {
    format_compact_number_with(&LocaleFormatter, value, locale).into_string()
}

pub fn format_compact_number_with<F: NumberFormatter + ?Sized>(
    formatter: &F,
    value: f64,
    locale: &str,
) -> Rendered {
    if !value.is_finite() {
        return Rendered::Default("0".to_string());
    }
    match formatter.format_compact(value, locale) {
        Ok(s) => Rendered::Localized(s),
        Err(err) => {
            warn!(error = %err, locale, "Compact formatting failed, using manual suffixes");
            Rendered::Fallback(manual_compact(value))
        }
    }
}

// Fixed English suffixes with one decimal, used when the engine is unavailable.
fn manual_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude >= 1e9 {
        format!("{}{:.1}B", sign, magnitude / 1e9)
    } else if magnitude >= 1e6 {
        format!("{}{:.1}M", sign, magnitude / 1e6)
    } else if magnitude >= 1e3 {
        format!("{}{:.1}K", sign, magnitude / 1e3)
    } else {
        value.to_string()
    }
}

// --- Sizes & Durations ---

/// Byte count on a base-1024 ladder, trailing zeros removed: `1048576` → `"1 MB"`.
pub fn format_file_size(bytes: f64, decimals: usize) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 Bytes".to_string();
    }

    // Repeated division gives floor(log1024(bytes)) without the rounding
    // error of ln(bytes) / ln(1024) at exact powers.
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < FILE_SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.*}", decimals.min(MAX_FRACTION_DIGITS), value);
    format!("{} {}", trim_trailing_zeros(&fixed), FILE_SIZE_UNITS[unit])
}

/// The two coarsest non-zero units of days, hours, minutes and seconds:
/// `3665000` → `"1h 1m"`, `86700000` → `"1d 5m"`, `5000` → `"5s"`.
pub fn format_duration(milliseconds: f64) -> String {
    if !milliseconds.is_finite() || milliseconds < 0.0 {
        return "0s".to_string();
    }

    let total_seconds = (milliseconds / 1000.0).floor() as u64;
    let units = [
        (total_seconds / 86_400, "d"),
        ((total_seconds % 86_400) / 3_600, "h"),
        ((total_seconds % 3_600) / 60, "m"),
        (total_seconds % 60, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .take(2)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

fn trim_trailing_zeros(fixed: &str) -> &str {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    // Engine double that always fails, to drive the fallback paths.
    struct BrokenEngine;

    impl NumberFormatter for BrokenEngine {
        fn format_decimal(&self, _: f64, _: &str, _: usize, _: usize) -> Result<String, FormatError> {
            Err(FormatError::Engine("offline".to_string()))
        }

        fn format_currency(&self, _: f64, _: Currency, _: &str, _: usize, _: usize) -> Result<String, FormatError> {
            Err(FormatError::Engine("offline".to_string()))
        }

        fn format_compact(&self, _: f64, _: &str) -> Result<String, FormatError> {
            Err(FormatError::Engine("offline".to_string()))
        }
    }

    #[test]
    fn test_format_currency_usd() {
        let options = CurrencyOptions::new(Currency::Usd);
        assert_eq!(format_currency(1234.56, &options), "$1,234.56");
    }

    #[test]
    fn test_format_currency_defaults_to_pounds() {
        assert_eq!(format_currency(3.5, &CurrencyOptions::default()), "£3.50");
    }

    #[test]
    fn test_format_currency_non_finite() {
        let options = CurrencyOptions::new(Currency::Eur);
        assert_eq!(format_currency(f64::NAN, &options), "€0.00");
        assert_eq!(format_currency(f64::INFINITY, &options), "€0.00");
        assert_eq!(
            format_currency_with(&LocaleFormatter, f64::NEG_INFINITY, &options),
            Rendered::Default("€0.00".to_string())
        );
    }

    #[test]
    fn test_format_currency_engine_failure_falls_back() {
        let options = CurrencyOptions::new(Currency::Usd);
        let rendered = format_currency_with(&BrokenEngine, 1234.5, &options);
        assert_eq!(rendered, Rendered::Fallback("$1234.50".to_string()));
    }

    #[test]
    fn test_format_currency_unknown_locale_falls_back() {
        let options = CurrencyOptions::new(Currency::Gbp).with_locale("tlh-KX");
        let rendered = format_currency_with(&LocaleFormatter, 12.0, &options);
        assert!(rendered.is_fallback());
        assert_eq!(rendered.as_str(), "£12.00");
    }

    #[test]
    fn test_get_currency_symbol() {
        assert_eq!(get_currency_symbol("USD"), "$");
        assert_eq!(get_currency_symbol("gbp"), "£");
        assert_eq!(get_currency_symbol("CHF"), "CHF");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_234_567.0, "en-GB"), "1,234,567");
        assert_eq!(format_number(1234.5, "de-DE"), "1.234,5");
        assert_eq!(format_number(f64::NAN, "en-GB"), "0");
        assert_eq!(
            format_number_with(&BrokenEngine, 1234.5, "en-GB"),
            Rendered::Fallback("1234.5".to_string())
        );
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.1234, 2), "12.34%");
        assert_eq!(format_percentage(0.5, 0), "50%");
        assert_eq!(format_percentage(f64::NAN, 2), "0%");
        assert_eq!(format_percentage(f64::INFINITY, 2), "0%");
    }

    #[test]
    fn test_format_compact_number() {
        assert_eq!(format_compact_number(1500.0, "en-GB"), "1.5K");
        assert_eq!(format_compact_number(2_500_000.0, "en-GB"), "2.5M");
        assert_eq!(format_compact_number(f64::NAN, "en-GB"), "0");
    }

    #[test]
    fn test_format_compact_number_manual_fallback() {
        let cases = [
            (1_500.0, "1.5K"),
            (-2_500_000.0, "-2.5M"),
            (3_000_000_000.0, "3.0B"),
            (999.0, "999"),
        ];
        for (value, expected) in cases {
            let rendered = format_compact_number_with(&BrokenEngine, value, "en-GB");
            assert_eq!(rendered, Rendered::Fallback(expected.to_string()), "value {}", value);
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(1_048_576.0, 2), "1 MB");
        assert_eq!(format_file_size(1536.0, 2), "1.5 KB");
        assert_eq!(format_file_size(500.0, 2), "500 Bytes");
        assert_eq!(format_file_size(1_073_741_824.0 * 1.5, 1), "1.5 GB");
        assert_eq!(format_file_size(1024f64.powi(6), 2), "1024 PB");
    }

    #[test]
    fn test_format_file_size_unusable_input() {
        assert_eq!(format_file_size(0.0, 2), "0 Bytes");
        assert_eq!(format_file_size(-1.0, 2), "0 Bytes");
        assert_eq!(format_file_size(f64::NAN, 2), "0 Bytes");
        assert_eq!(format_file_size(f64::INFINITY, 2), "0 Bytes");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3_665_000.0), "1h 1m");
        assert_eq!(format_duration(93_600_000.0), "1d 2h");
        assert_eq!(format_duration(86_400_000.0), "1d");
        assert_eq!(format_duration(65_000.0), "1m 5s");
        assert_eq!(format_duration(5_000.0), "5s");
        assert_eq!(format_duration(999.0), "0s");
    }

    #[test]
    fn test_format_duration_skips_zero_units() {
        assert_eq!(format_duration(86_700_000.0), "1d 5m");
        assert_eq!(format_duration(3_605_000.0), "1h 5s");
        assert_eq!(format_duration(86_401_000.0), "1d 1s");
    }

    #[test]
    fn test_huge_fraction_digit_counts_are_capped() {
        let options = CurrencyOptions::new(Currency::Usd).with_fraction_digits(0, 70_000);
        assert_eq!(format_currency(1.0, &options), "$1");

        let wide = CurrencyOptions::new(Currency::Usd).with_fraction_digits(2, 70_000);
        let fallback = format_currency_with(&BrokenEngine, 1.0, &wide);
        assert!(fallback.is_fallback());
        assert_eq!(fallback.as_str(), format!("$1.{}", "0".repeat(MAX_FRACTION_DIGITS)));

        assert_eq!(
            format_percentage(0.5, 70_000),
            format!("50.{}%", "0".repeat(MAX_FRACTION_DIGITS))
        );
        assert_eq!(format_file_size(1536.0, 70_000), "1.5 KB");
    }

    #[test]
    fn test_format_duration_unusable_input() {
        assert_eq!(format_duration(-1.0), "0s");
        assert_eq!(format_duration(f64::NAN), "0s");
        assert_eq!(format_duration(f64::INFINITY), "0s");
    }
}

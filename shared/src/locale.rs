// Number formatting engine.
//
// The formatting functions in `crate::formatting` never talk to a concrete
// engine directly; they go through the `NumberFormatter` trait so a caller
// (or a test) can swap the engine out. `LocaleFormatter` is the built-in
// engine, covering a fixed table of locales.

use crate::constants::Currency;
use crate::error::FormatError;

/// Largest fraction digit count an engine is expected to honour.
pub const MAX_FRACTION_DIGITS: usize = 20;

/// A locale-aware number formatting capability.
///
/// Every method may fail; callers are expected to recover with a fallback.
pub trait NumberFormatter {
    /// Grouped decimal with between `min_fraction` and `max_fraction` digits.
    fn format_decimal(
        &self,
        value: f64,
        locale: &str,
        min_fraction: usize,
        max_fraction: usize,
    ) -> Result<String, FormatError>;

    /// Like `format_decimal`, with the currency symbol placed the way the
    /// locale places it.
    fn format_currency(
        &self,
        value: f64,
        currency: Currency,
        locale: &str,
        min_fraction: usize,
        max_fraction: usize,
    ) -> Result<String, FormatError>;

    /// Short compact notation, e.g. `1.2K` in English.
    fn format_compact(&self, value: f64, locale: &str) -> Result<String, FormatError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    PrefixSpaced,
    Suffix,
}

/// Separators and placement rules for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSpec {
    pub tag: &'static str,
    pub group_separator: char,
    pub decimal_separator: char,
    symbol_position: SymbolPosition,
    // Thousand, million, billion.
    compact_suffixes: [&'static str; 3],
}

static LOCALES: [LocaleSpec; 6] = [
    LocaleSpec {
        tag: "en-GB",
        group_separator: ',',
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
        compact_suffixes: ["K", "M", "B"],
    },
    LocaleSpec {
        tag: "en-US",
        group_separator: ',',
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
        compact_suffixes: ["K", "M", "B"],
    },
    LocaleSpec {
        tag: "de-DE",
        group_separator: '.',
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
        compact_suffixes: [" Tsd.", " Mio.", " Mrd."],
    },
    LocaleSpec {
        tag: "fr-FR",
        group_separator: '\u{202f}',
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
        compact_suffixes: [" k", " M", " Md"],
    },
    LocaleSpec {
        tag: "es-ES",
        group_separator: '.',
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
        compact_suffixes: [" mil", " M", " mil M"],
    },
    LocaleSpec {
        tag: "pt-BR",
        group_separator: '.',
        decimal_separator: ',',
        symbol_position: SymbolPosition::PrefixSpaced,
        compact_suffixes: [" mil", " mi", " bi"],
    },
];

/// Resolves a locale identifier against the supported table.
///
/// Matching ignores case and accepts `_` for `-`. When the full tag is not
/// known, the first locale with the same language is used (`en` → `en-GB`,
/// `de-AT` → `de-DE`).
pub fn resolve_locale(locale: &str) -> Result<&'static LocaleSpec, FormatError> {
    let normalized = locale.trim().replace('_', "-");
    if let Some(rules) = LOCALES
        .iter()
        .find(|rules| rules.tag.eq_ignore_ascii_case(&normalized))
    {
        return Ok(rules);
    }

    let language = normalized.split('-').next().unwrap_or_default();
    if language.is_empty() {
        return Err(FormatError::UnsupportedLocale(locale.to_string()));
    }
    LOCALES
        .iter()
        .find(|rules| {
            rules.tag
                .split('-')
                .next()
                .is_some_and(|l| l.eq_ignore_ascii_case(language))
        })
        .ok_or_else(|| FormatError::UnsupportedLocale(locale.to_string()))
}

/// The built-in engine backed by the static locale table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter;

impl LocaleFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl NumberFormatter for LocaleFormatter {
    fn format_decimal(
        &self,
        value: f64,
        locale: &str,
        min_fraction: usize,
        max_fraction: usize,
    ) -> Result<String, FormatError> {
        check_finite(value)?;
        check_fraction_digits(min_fraction, max_fraction)?;
        let rules = resolve_locale(locale)?;
        let (negative, digits) = format_digits(value, min_fraction, max_fraction, rules);
        Ok(if negative { format!("-{}", digits) } else { digits })
    }

    fn format_currency(
        &self,
        value: f64,
        currency: Currency,
        locale: &str,
        min_fraction: usize,
        max_fraction: usize,
    ) -> Result<String, FormatError> {
        check_finite(value)?;
        check_fraction_digits(min_fraction, max_fraction)?;
        let rules = resolve_locale(locale)?;
        let (negative, digits) = format_digits(value, min_fraction, max_fraction, rules);
        let sign = if negative { "-" } else { "" };
        let symbol = currency.symbol();

        Ok(match rules.symbol_position {
            SymbolPosition::Prefix => format!("{}{}{}", sign, symbol, digits),
            SymbolPosition::PrefixSpaced => format!("{}{}\u{a0}{}", sign, symbol, digits),
            SymbolPosition::Suffix => format!("{}{}\u{a0}{}", sign, digits, symbol),
        })
    }

    fn format_compact(&self, value: f64, locale: &str) -> Result<String, FormatError> {
        check_finite(value)?;
        let rules = resolve_locale(locale)?;

        let magnitude = value.abs();
        // 0 = no suffix, then thousand, million, billion.
        let mut tier = match magnitude {
            m if m >= 1e9 => 3,
            m if m >= 1e6 => 2,
            m if m >= 1e3 => 1,
            _ => 0,
        };

        loop {
            let scaled = magnitude / 1000f64.powi(tier);
            // Two significant digits for a single integer digit, integers otherwise.
            let fraction = if scaled < 10.0 { 1 } else { 0 };
            let rounded = round_to(scaled, fraction);
            if rounded >= 1000.0 && tier < 3 {
                tier += 1;
                continue;
            }

            let (_, digits) = format_digits(rounded, 0, fraction, rules);
            let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
            let suffix = if tier == 0 {
                ""
            } else {
                rules.compact_suffixes[tier as usize - 1]
            };
            return Ok(format!("{}{}{}", sign, digits, suffix));
        }
    }
}

fn check_finite(value: f64) -> Result<(), FormatError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FormatError::NonFinite(value))
    }
}

fn check_fraction_digits(min: usize, max: usize) -> Result<(), FormatError> {
    if min > max || max > MAX_FRACTION_DIGITS {
        Err(FormatError::InvalidFractionDigits { min, max })
    } else {
        Ok(())
    }
}

fn round_to(value: f64, fraction: usize) -> f64 {
    let factor = 10f64.powi(fraction as i32);
    (value * factor).round() / factor
}

// Returns the sign separately so currency placement can put it in front of
// the symbol. A value that rounds to zero is never negative.
fn format_digits(value: f64, min_fraction: usize, max_fraction: usize, rules: &LocaleSpec) -> (bool, String) {
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut fraction = frac_part.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut out = group_integer(int_part, rules.group_separator);
    if !fraction.is_empty() {
        out.push(rules.decimal_separator);
        out.push_str(&fraction);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    (value < 0.0 && !is_zero, out)
}

/// Inserts `separator` between every group of three integer digits.
pub fn group_integer(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut result = String::with_capacity(digits.len() + len / 3 * separator.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result
}

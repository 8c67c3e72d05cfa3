// Static configuration shared by the formatting and date utilities and by the
// inventory views: closed enumerations, their display tables, numeric defaults
// and validation patterns.
//
// Every lookup table is an exhaustive `match`, so adding a variant without its
// symbol/icon/style entry does not compile.

use crate::error::UnknownValueError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

// --- Numeric Defaults ---

pub const DEFAULT_LOCALE: &str = "en-GB";
pub const DEFAULT_CURRENCY: Currency = Currency::Gbp;

/// Monthly household budget used when the user has not set one.
pub const DEFAULT_BUDGET_LIMIT: f64 = 400.0;
/// Percentage of the budget at which spending alerts start.
pub const BUDGET_ALERT_THRESHOLD_PERCENT: f64 = 80.0;

pub const CACHE_DURATION: Duration = Duration::from_secs(5 * 60);
pub const PAGINATION_SIZE: usize = 20;
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Items expiring within this many days (inclusive) are "expires soon".
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// Sentinel returned by the date functions for unparsable input.
pub const INVALID_DATE: &str = "Invalid date";

// --- Currencies ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Gbp,
    Usd,
    Eur,
    Cad,
    Aud,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Gbp,
        Currency::Usd,
        Currency::Eur,
        Currency::Cad,
        Currency::Aud,
        Currency::Jpy,
    ];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
            Currency::Jpy => "¥",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Gbp => "British Pound",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Cad => "Canadian Dollar",
            Currency::Aud => "Australian Dollar",
            Currency::Jpy => "Japanese Yen",
        }
    }
}

impl FromStr for Currency {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownValueError::new("currency", s))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// --- Food Categories ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Grains,
    Canned,
    Frozen,
    Beverages,
    Snacks,
    Condiments,
    Other,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 12] = [
        FoodCategory::Produce,
        FoodCategory::Dairy,
        FoodCategory::Meat,
        FoodCategory::Seafood,
        FoodCategory::Bakery,
        FoodCategory::Grains,
        FoodCategory::Canned,
        FoodCategory::Frozen,
        FoodCategory::Beverages,
        FoodCategory::Snacks,
        FoodCategory::Condiments,
        FoodCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Produce => "produce",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Meat => "meat",
            FoodCategory::Seafood => "seafood",
            FoodCategory::Bakery => "bakery",
            FoodCategory::Grains => "grains",
            FoodCategory::Canned => "canned",
            FoodCategory::Frozen => "frozen",
            FoodCategory::Beverages => "beverages",
            FoodCategory::Snacks => "snacks",
            FoodCategory::Condiments => "condiments",
            FoodCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Produce => "Fruit & Vegetables",
            FoodCategory::Dairy => "Dairy & Eggs",
            FoodCategory::Meat => "Meat",
            FoodCategory::Seafood => "Fish & Seafood",
            FoodCategory::Bakery => "Bakery",
            FoodCategory::Grains => "Pasta, Rice & Grains",
            FoodCategory::Canned => "Tins & Jars",
            FoodCategory::Frozen => "Frozen",
            FoodCategory::Beverages => "Drinks",
            FoodCategory::Snacks => "Snacks",
            FoodCategory::Condiments => "Sauces & Condiments",
            FoodCategory::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FoodCategory::Produce => "🥬",
            FoodCategory::Dairy => "🥛",
            FoodCategory::Meat => "🥩",
            FoodCategory::Seafood => "🐟",
            FoodCategory::Bakery => "🍞",
            FoodCategory::Grains => "🌾",
            FoodCategory::Canned => "🥫",
            FoodCategory::Frozen => "🧊",
            FoodCategory::Beverages => "🧃",
            FoodCategory::Snacks => "🍿",
            FoodCategory::Condiments => "🧂",
            FoodCategory::Other => "📦",
        }
    }
}

impl FromStr for FoodCategory {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        FoodCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownValueError::new("food category", s))
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Storage Locations ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
    Cupboard,
    Counter,
}

impl StorageLocation {
    pub const ALL: [StorageLocation; 5] = [
        StorageLocation::Fridge,
        StorageLocation::Freezer,
        StorageLocation::Pantry,
        StorageLocation::Cupboard,
        StorageLocation::Counter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageLocation::Fridge => "fridge",
            StorageLocation::Freezer => "freezer",
            StorageLocation::Pantry => "pantry",
            StorageLocation::Cupboard => "cupboard",
            StorageLocation::Counter => "counter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StorageLocation::Fridge => "Fridge",
            StorageLocation::Freezer => "Freezer",
            StorageLocation::Pantry => "Pantry",
            StorageLocation::Cupboard => "Cupboard",
            StorageLocation::Counter => "Counter",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StorageLocation::Fridge => "❄️",
            StorageLocation::Freezer => "🧊",
            StorageLocation::Pantry => "🥫",
            StorageLocation::Cupboard => "🗄️",
            StorageLocation::Counter => "🍎",
        }
    }
}

impl FromStr for StorageLocation {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        StorageLocation::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownValueError::new("storage location", s))
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Expiry Status ---

/// Background, text and border style tokens used to render a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    Expired,
    ExpiresToday,
    ExpiresSoon,
    Fresh,
}

impl ExpiryStatus {
    pub const ALL: [ExpiryStatus; 4] = [
        ExpiryStatus::Expired,
        ExpiryStatus::ExpiresToday,
        ExpiryStatus::ExpiresSoon,
        ExpiryStatus::Fresh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::ExpiresToday => "expires-today",
            ExpiryStatus::ExpiresSoon => "expires-soon",
            ExpiryStatus::Fresh => "fresh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiresToday => "Expires today",
            ExpiryStatus::ExpiresSoon => "Expires soon",
            ExpiryStatus::Fresh => "Fresh",
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            ExpiryStatus::Expired => StatusStyle {
                background: "bg-red-100",
                text: "text-red-800",
                border: "border-red-200",
            },
            ExpiryStatus::ExpiresToday => StatusStyle {
                background: "bg-orange-100",
                text: "text-orange-800",
                border: "border-orange-200",
            },
            ExpiryStatus::ExpiresSoon => StatusStyle {
                background: "bg-yellow-100",
                text: "text-yellow-800",
                border: "border-yellow-200",
            },
            ExpiryStatus::Fresh => StatusStyle {
                background: "bg-green-100",
                text: "text-green-800",
                border: "border-green-200",
            },
        }
    }
}

impl FromStr for ExpiryStatus {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        ExpiryStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownValueError::new("expiry status", s))
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Transaction Sources & Auth Providers ---

/// Where a budget transaction was recorded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionSource {
    Manual,
    Receipt,
    BankImport,
    Recurring,
}

impl TransactionSource {
    pub const ALL: [TransactionSource; 4] = [
        TransactionSource::Manual,
        TransactionSource::Receipt,
        TransactionSource::BankImport,
        TransactionSource::Recurring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSource::Manual => "manual",
            TransactionSource::Receipt => "receipt",
            TransactionSource::BankImport => "bank-import",
            TransactionSource::Recurring => "recurring",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionSource::Manual => "Entered manually",
            TransactionSource::Receipt => "Scanned receipt",
            TransactionSource::BankImport => "Bank import",
            TransactionSource::Recurring => "Recurring payment",
        }
    }
}

impl FromStr for TransactionSource {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        TransactionSource::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownValueError::new("transaction source", s))
    }
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Apple,
    Github,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 3] = [
        OAuthProvider::Google,
        OAuthProvider::Apple,
        OAuthProvider::Github,
    ];

    /// Provider identifier as expected by the auth service.
    pub fn id(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Apple => "apple",
            OAuthProvider::Github => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Apple => "Apple",
            OAuthProvider::Github => "GitHub",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        OAuthProvider::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownValueError::new("OAuth provider", s))
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// --- Date Formats ---

/// Named date patterns accepted by `dates::format_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    Full,
    #[default]
    Short,
    Medium,
    Time,
    DateTime,
    Iso,
}

impl DateFormat {
    pub const ALL: [DateFormat; 6] = [
        DateFormat::Full,
        DateFormat::Short,
        DateFormat::Medium,
        DateFormat::Time,
        DateFormat::DateTime,
        DateFormat::Iso,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::Full => "full",
            DateFormat::Short => "short",
            DateFormat::Medium => "medium",
            DateFormat::Time => "time",
            DateFormat::DateTime => "datetime",
            DateFormat::Iso => "iso",
        }
    }

    /// chrono `strftime` pattern.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Full => "%A, %-d %B %Y",
            DateFormat::Short => "%d/%m/%Y",
            DateFormat::Medium => "%-d %b %Y",
            DateFormat::Time => "%H:%M",
            DateFormat::DateTime => "%d/%m/%Y %H:%M",
            DateFormat::Iso => "%Y-%m-%d",
        }
    }
}

impl FromStr for DateFormat {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        DateFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownValueError::new("date format", s))
    }
}

// --- Validation Patterns ---

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const EAN13_PATTERN: &str = r"^\d{13}$";
pub const UPC_PATTERN: &str = r"^\d{12}$";
pub const POSITIVE_NUMBER_PATTERN: &str = r"^\d*\.?\d+$";

// The patterns are literals, so compiling them cannot fail at runtime.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));
pub static EAN13_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EAN13_PATTERN).expect("EAN-13 pattern compiles"));
pub static UPC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UPC_PATTERN).expect("UPC pattern compiles"));
pub static POSITIVE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(POSITIVE_NUMBER_PATTERN).expect("positive number pattern compiles")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_currency_has_distinct_symbol_and_name() {
        let mut symbols: Vec<&str> = Currency::ALL.iter().map(|c| c.symbol()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), Currency::ALL.len());
        assert!(Currency::ALL.iter().all(|c| !c.name().is_empty()));
    }

    #[test]
    fn test_currency_from_str_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::Eur);
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency: 'XYZ'");
    }

    #[test]
    fn test_string_forms_round_trip() {
        for c in FoodCategory::ALL {
            assert_eq!(c.as_str().parse::<FoodCategory>().unwrap(), c);
            assert!(!c.icon().is_empty());
        }
        for l in StorageLocation::ALL {
            assert_eq!(l.to_string().parse::<StorageLocation>().unwrap(), l);
            assert!(!l.icon().is_empty());
        }
        for s in ExpiryStatus::ALL {
            assert_eq!(s.as_str().parse::<ExpiryStatus>().unwrap(), s);
        }
        for t in TransactionSource::ALL {
            assert_eq!(t.as_str().parse::<TransactionSource>().unwrap(), t);
        }
        for p in OAuthProvider::ALL {
            assert_eq!(p.id().parse::<OAuthProvider>().unwrap(), p);
        }
        for f in DateFormat::ALL {
            assert_eq!(f.as_str().to_uppercase().parse::<DateFormat>().unwrap(), f);
        }
    }

    #[test]
    fn test_expiry_styles_use_matching_colour_family() {
        for status in ExpiryStatus::ALL {
            let style = status.style();
            let colour = style.background.trim_start_matches("bg-").split('-').next().unwrap();
            assert!(style.text.contains(colour), "{:?}", status);
            assert!(style.border.contains(colour), "{:?}", status);
        }
    }

    #[test]
    fn test_serde_names_match_string_forms() {
        assert_eq!(serde_json::to_string(&ExpiryStatus::ExpiresSoon).unwrap(), "\"expires-soon\"");
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        assert_eq!(serde_json::to_string(&TransactionSource::BankImport).unwrap(), "\"bank-import\"");
        let loc: StorageLocation = serde_json::from_str("\"freezer\"").unwrap();
        assert_eq!(loc, StorageLocation::Freezer);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_CURRENCY.symbol(), "£");
        assert_eq!(EXPIRY_WARNING_DAYS, 7);
        assert_eq!(CACHE_DURATION.as_secs(), 300);
        assert_eq!(DEBOUNCE_DELAY.as_millis(), 300);
        assert_eq!(DateFormat::default(), DateFormat::Short);
    }

    #[test]
    fn test_patterns_compile() {
        assert!(EMAIL_REGEX.is_match("cook@example.com"));
        assert!(EAN13_REGEX.is_match("5000112637922"));
        assert!(UPC_REGEX.is_match("012345678905"));
        assert!(POSITIVE_NUMBER_REGEX.is_match("3.50"));
    }
}

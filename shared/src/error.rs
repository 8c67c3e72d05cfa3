use thiserror::Error;

// Faults raised by a number formatting engine. They never leave the public
// formatting functions: the callers catch them, log them and fall back to a
// manually built string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid fraction digits: min {min}, max {max}")]
    InvalidFractionDigits { min: usize, max: usize },

    #[error("Value is not finite: {0}")]
    NonFinite(f64),

    // Used by custom engines (and test doubles) that fail for their own reasons.
    #[error("Formatting engine failure: {0}")]
    Engine(String),
}

// Returned by the `FromStr` impls of the constants enums.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValueError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

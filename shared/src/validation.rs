// Shape checks for user-entered values, backed by the patterns in `constants`.
use crate::constants::{EAN13_REGEX, EMAIL_REGEX, POSITIVE_NUMBER_REGEX, UPC_REGEX};

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input.trim())
}

/// EAN-13 (13 digits) or UPC-A (12 digits). Only the length and digits are
/// checked, not the check digit.
pub fn is_valid_barcode(input: &str) -> bool {
    let code = input.trim();
    EAN13_REGEX.is_match(code) || UPC_REGEX.is_match(code)
}

/// Unsigned decimal such as `3`, `0.5` or `.75`.
pub fn is_positive_number(input: &str) -> bool {
    POSITIVE_NUMBER_REGEX.is_match(input.trim())
}

//! Compiled regex patterns for numeric inference.

use regex::Regex;

/// Pattern for plain decimal numbers: optional sign, digits, optional
/// fractional part. No exponents, no thousands separators, no locale
/// variants.
pub static DECIMAL_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)$").expect("Invalid decimal pattern")
});

//! Per-cell type inference.

use super::regexes::DECIMAL_PATTERN;
use crate::value::Value;

/// Check for an unsigned run of ASCII digits without touching the regex.
/// This is a hot path optimization - called for every cell.
#[inline]
fn is_plain_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a field as a decimal number.
///
/// The field is trimmed first; an empty field is never numeric. Anything
/// beyond an optional sign, digits and an optional fractional part is
/// rejected outright rather than parsed as a prefix.
pub fn parse_number(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !is_plain_digits(trimmed) && !DECIMAL_PATTERN.is_match(trimmed) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Build the typed value for a raw field. Non-numeric and empty fields keep
/// their string content unchanged.
#[inline]
pub fn infer_value(field: &str) -> Value {
    match parse_number(field) {
        Some(n) => Value::Number(n),
        None => Value::Text(field.to_string()),
    }
}

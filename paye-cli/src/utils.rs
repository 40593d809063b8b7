use rust_decimal::Decimal;
use thiserror::Error;

use paye_core::format::NAIRA_SIGN;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and drops the naira
/// sign, commas and a trailing percent sign.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .trim_end_matches('%')
        .replace(NAIRA_SIGN, "")
        .replace(',', "")
        .trim()
        .to_string()
}

/// Parses a string into a [`Decimal`].
///
/// Accepts `"1,200,000"`, `"₦1,200,000"` and `"8%"`.
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

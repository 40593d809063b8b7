//! Display formatting for Naira amounts.
//!
//! Amounts are rounded to whole Naira for display only; computations keep
//! full precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol used for every monetary field.
pub const NAIRA_SIGN: &str = "₦";

/// Rounds a value to whole Naira, half away from zero.
pub fn round_to_naira(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as `₦1,234,567`, with negatives as `-₦1,234`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::format::format_naira;
///
/// assert_eq!(format_naira(dec!(1234567.49)), "₦1,234,567");
/// assert_eq!(format_naira(dec!(-2500)), "-₦2,500");
/// ```
pub fn format_naira(amount: Decimal) -> String {
    let rounded = round_to_naira(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}{NAIRA_SIGN}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

//! Currency display formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency unit printed after every amount.
pub const CURRENCY_SUFFIX: &str = "VND";

/// Formats an amount as whole currency units with thousands separators.
///
/// The amount is rounded half away from zero immediately before formatting.
///
/// # Examples
///
/// ```
/// use payslip_engine::payslip::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(8_950_000)), "8,950,000 VND");
/// assert_eq!(format_currency(Decimal::from_str("2163461.5").unwrap()), "2,163,462 VND");
/// assert_eq!(format_currency(Decimal::from(999)), "999 VND");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{} {}", grouped, CURRENCY_SUFFIX)
}

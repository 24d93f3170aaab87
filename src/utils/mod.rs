//! Formatting helpers for money and rates
//!
//! Every amount shown to the user goes through these so the console,
//! the tables and the interactive mode agree on presentation.

use rust_decimal::Decimal;

use crate::ledger::round_money;

/// Format a monetary value with thousands separators and two decimals.
///
/// Negative values put the sign after the symbol, e.g. `$-1,234.56`.
///
/// # Examples
/// ```
/// use savings::utils::format_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_money(dec!(1234.5), "$"), "$1,234.50");
/// assert_eq!(format_money(dec!(-0.01), "€ "), "€ -0.01");
/// ```
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let is_negative = value < Decimal::ZERO;
    let formatted = format!("{:.2}", round_money(value.abs()));
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    format!("{}{}{}.{}", symbol, sign, with_separators, decimal_part)
}

/// Same as [`format_money`], right-aligned to `width`.
pub fn format_money_aligned(value: Decimal, symbol: &str, width: usize) -> String {
    format!("{:>width$}", format_money(value, symbol), width = width)
}

/// Format an interest rate as a percentage without trailing zeros: "5%", "2.75%".
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

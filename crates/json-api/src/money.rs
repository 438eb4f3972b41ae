//! Money rendering for JSON responses.

use rust_decimal::Decimal;

/// Render an amount with exactly two fractional digits, e.g. `"250.00"`.
pub(crate) fn format_money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

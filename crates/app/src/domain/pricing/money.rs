//! Money rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest unit price the order store can hold (`NUMERIC(10, 2)`).
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Largest order total the order store can hold (`NUMERIC(20, 2)`).
pub const MAX_ORDER_TOTAL: Decimal =
    Decimal::from_parts(1_661_992_959, 1_808_227_885, 5, false, 2);

/// Round half away from zero to two decimal places, keeping the scale at
/// exactly two so `5` renders as `5.00`.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(value: &str) -> Decimal {
        value.parse().expect("valid decimal literal")
    }

    #[test]
    fn rounds_midpoints_away_from_zero() {
        assert_eq!(round_money(money("1.005")), money("1.01"));
        assert_eq!(round_money(money("2.675")), money("2.68"));
        assert_eq!(round_money(money("1.004")), money("1.00"));
    }

    #[test]
    fn pads_to_two_decimal_places() {
        assert_eq!(round_money(money("5")).to_string(), "5.00");
        assert_eq!(round_money(money("12.5")).to_string(), "12.50");
    }

    #[test]
    fn max_unit_price_matches_storage_precision() {
        assert_eq!(MAX_UNIT_PRICE, money("99999999.99"));
    }

    #[test]
    fn max_order_total_matches_storage_precision() {
        assert_eq!(MAX_ORDER_TOTAL, money("999999999999999999.99"));
    }
}

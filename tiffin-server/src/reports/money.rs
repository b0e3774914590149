//! Money display rounding
//!
//! Storage keeps exact decimal values; reports and exports round to two
//! decimals half-up at the display edge only.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, midpoints away from zero (0.005 -> 0.01)
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed two-decimal rendering for report text and CSV cells
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_display(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[test]
    fn midpoint_rounds_up_not_bankers() {
        assert_eq!(format_money(Decimal::from_str("2.005").unwrap()), "2.01");
        assert_eq!(format_money(Decimal::from_str("2.015").unwrap()), "2.02");
        assert_eq!(format_money(Decimal::from_str("2.004").unwrap()), "2.00");
    }

    #[test]
    fn always_two_decimals() {
        assert_eq!(format_money(Decimal::from(5)), "5.00");
        assert_eq!(format_money(Decimal::from_str("5.5").unwrap()), "5.50");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }
}

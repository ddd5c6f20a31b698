//! Monetary types for hourly rates and daily totals.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hourly rate in USD (per vCPU-hour or per GB-hour).
pub type UsdPerHour = Decimal;

/// Daily total in USD for one instance of a given shape.
pub type UsdPerDay = Decimal;

/// Hours billed per day.
pub const HOURS_PER_DAY: Decimal = dec!(24);

/// Format a daily cost the way manifests and tables display it (`$0.78`).
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_decimal() {
        let core: UsdPerHour = dec!(0.00527);
        let daily: UsdPerDay = core * HOURS_PER_DAY;

        assert_eq!(daily, dec!(0.12648));
    }

    #[test]
    fn format_usd_rounds_to_cents() {
        assert_eq!(format_usd(dec!(0.77856)), "$0.78");
        assert_eq!(format_usd(dec!(5)), "$5.00");
    }
}

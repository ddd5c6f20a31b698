//! Total-cost model.
//!
//! A candidate's comparable figure is the daily cost of running one instance
//! of the requested shape: `24 × (vcpus × core_rate + ram_gb × ram_rate)`.
//!
//! [`Shape`] and [`MachineFamilyPricing`] bound their inputs, so the
//! arithmetic here stays far inside `Decimal` range.

use rust_decimal::Decimal;

use super::money::{UsdPerDay, UsdPerHour, HOURS_PER_DAY};
use super::pricing::MachineFamilyPricing;
use super::shape::Shape;

/// Hourly cost of one instance of `shape` under `pricing`.
#[must_use]
pub fn hourly_cost(pricing: &MachineFamilyPricing, shape: &Shape) -> UsdPerHour {
    Decimal::from(shape.vcpus()) * pricing.core_price_per_hour()
        + shape.ram_gb() * pricing.ram_price_per_hour()
}

/// Daily cost of one instance of `shape` under `pricing`.
#[must_use]
pub fn daily_cost(pricing: &MachineFamilyPricing, shape: &Shape) -> UsdPerDay {
    HOURS_PER_DAY * hourly_cost(pricing, shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::MAX_RATE_PER_HOUR;
    use crate::domain::shape::{MAX_RAM_GB, MAX_VCPUS};
    use crate::domain::{Architecture, Tier};
    use rust_decimal_macros::dec;

    fn pricing(core: Decimal, ram: Decimal) -> MachineFamilyPricing {
        MachineFamilyPricing::try_new("e2", Architecture::Amd64, core, ram, Tier::Spot).unwrap()
    }

    #[test]
    fn matches_reference_figures() {
        let shape = Shape::try_new(4, dec!(16)).unwrap();

        let e2 = daily_cost(&pricing(dec!(0.00527), dec!(0.00071)), &shape);
        let c2d = daily_cost(&pricing(dec!(0.0067), dec!(0.0009)), &shape);

        assert_eq!(e2, dec!(0.77856));
        assert_eq!(c2d, dec!(0.9888));
    }

    #[test]
    fn degenerate_shape_costs_nothing() {
        let shape = Shape::try_new(0, dec!(0)).unwrap();
        assert_eq!(daily_cost(&pricing(dec!(0.01), dec!(0.001)), &shape), Decimal::ZERO);
    }

    #[test]
    fn cost_is_monotone_in_both_dimensions() {
        let pricing = pricing(dec!(0.0031), dec!(0.00042));
        let mut previous = Decimal::ZERO;

        for vcpus in 0..=16 {
            for ram in [dec!(0), dec!(0.5), dec!(4), dec!(16), dec!(64)] {
                let at = daily_cost(&pricing, &Shape::try_new(vcpus, ram).unwrap());
                let more_cpu = daily_cost(&pricing, &Shape::try_new(vcpus + 1, ram).unwrap());
                let more_ram =
                    daily_cost(&pricing, &Shape::try_new(vcpus, ram + dec!(1)).unwrap());

                assert!(more_cpu >= at);
                assert!(more_ram >= at);
            }
            let row = daily_cost(&pricing, &Shape::try_new(vcpus, dec!(0)).unwrap());
            assert!(row >= previous);
            previous = row;
        }
    }

    #[test]
    fn largest_inputs_stay_in_range() {
        let shape = Shape::try_new(i64::from(MAX_VCPUS), MAX_RAM_GB).unwrap();
        let cost = daily_cost(&pricing(MAX_RATE_PER_HOUR, MAX_RATE_PER_HOUR), &shape);

        assert_eq!(cost, dec!(24) * dec!(1000) * (dec!(4096) + dec!(65536)));
    }
}

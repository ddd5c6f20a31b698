//! Normalized per-family pricing.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::architecture::Architecture;
use super::error::DomainError;
use super::money::UsdPerHour;

/// Largest per-unit hourly rate accepted from a pricing source.
pub const MAX_RATE_PER_HOUR: UsdPerHour = dec!(1000);

/// Pricing tier for a machine family.
///
/// Declaration order is the tie-break order: spot sorts before on-demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Preemptible capacity at a discount.
    Spot,
    /// Regular capacity.
    OnDemand,
}

impl Tier {
    /// Whether this tier is preemptible spot capacity.
    #[must_use]
    pub const fn is_spot(self) -> bool {
        matches!(self, Self::Spot)
    }

    /// Human-readable label (`spot` / `on-demand`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::OnDemand => "on-demand",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hourly rates for one (family, tier) pair in one region.
///
/// Rates lie in `0..=MAX_RATE_PER_HOUR`, which keeps every cost computed
/// from a bounded [`Shape`](super::shape::Shape) within `Decimal` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineFamilyPricing {
    family: String,
    architecture: Architecture,
    core_price_per_hour: UsdPerHour,
    ram_price_per_hour: UsdPerHour,
    tier: Tier,
}

impl MachineFamilyPricing {
    /// Create a validated pricing record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyFamily`] for a blank family name,
    /// [`DomainError::NegativeRate`] when either rate is below zero and
    /// [`DomainError::RateOutOfRange`] when either exceeds
    /// [`MAX_RATE_PER_HOUR`].
    pub fn try_new(
        family: impl Into<String>,
        architecture: Architecture,
        core_price_per_hour: UsdPerHour,
        ram_price_per_hour: UsdPerHour,
        tier: Tier,
    ) -> Result<Self, DomainError> {
        let family = family.into().trim().to_ascii_lowercase();
        if family.is_empty() {
            return Err(DomainError::EmptyFamily);
        }
        for (rate, value) in [("core", core_price_per_hour), ("ram", ram_price_per_hour)] {
            if value < Decimal::ZERO {
                return Err(DomainError::NegativeRate {
                    family,
                    rate,
                    value,
                });
            }
            if value > MAX_RATE_PER_HOUR {
                return Err(DomainError::RateOutOfRange {
                    family,
                    rate,
                    value,
                    max: MAX_RATE_PER_HOUR,
                });
            }
        }

        Ok(Self {
            family,
            architecture,
            core_price_per_hour,
            ram_price_per_hour,
            tier,
        })
    }

    /// Lowercase machine family name (`e2`, `n2d`).
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// CPU architecture the family runs on.
    #[must_use]
    pub const fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// USD per vCPU-hour.
    #[must_use]
    pub const fn core_price_per_hour(&self) -> UsdPerHour {
        self.core_price_per_hour
    }

    /// USD per GB-hour.
    #[must_use]
    pub const fn ram_price_per_hour(&self) -> UsdPerHour {
        self.ram_price_per_hour
    }

    /// Spot or on-demand.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn spot_sorts_before_on_demand() {
        assert!(Tier::Spot < Tier::OnDemand);
        assert!(Tier::Spot.is_spot());
        assert_eq!(Tier::OnDemand.label(), "on-demand");
    }

    #[test]
    fn family_is_normalized() {
        let pricing = MachineFamilyPricing::try_new(
            " E2 ",
            Architecture::Amd64,
            dec!(0.00527),
            dec!(0.00071),
            Tier::Spot,
        )
        .unwrap();

        assert_eq!(pricing.family(), "e2");
    }

    #[test]
    fn rejects_blank_family() {
        let result =
            MachineFamilyPricing::try_new("  ", Architecture::Arm, dec!(0), dec!(0), Tier::Spot);
        assert_eq!(result, Err(DomainError::EmptyFamily));
    }

    #[test]
    fn rejects_negative_rates() {
        let result = MachineFamilyPricing::try_new(
            "n2",
            Architecture::Amd64,
            dec!(0.01),
            dec!(-0.001),
            Tier::OnDemand,
        );
        assert!(matches!(
            result,
            Err(DomainError::NegativeRate { rate: "ram", .. })
        ));
    }

    #[test]
    fn rejects_implausible_rates() {
        let result = MachineFamilyPricing::try_new(
            "m1",
            Architecture::Amd64,
            Decimal::MAX,
            dec!(0.05),
            Tier::OnDemand,
        );
        assert!(matches!(
            result,
            Err(DomainError::RateOutOfRange { rate: "core", .. })
        ));
        assert!(MachineFamilyPricing::try_new(
            "m1",
            Architecture::Amd64,
            MAX_RATE_PER_HOUR,
            MAX_RATE_PER_HOUR,
            Tier::OnDemand,
        )
        .is_ok());
    }
}

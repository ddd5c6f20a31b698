//! Pricing records costed for a specific shape.

use super::cost;
use super::money::UsdPerDay;
use super::pricing::{MachineFamilyPricing, Tier};
use super::shape::Shape;

/// A pricing record annotated with its daily cost for one shape.
///
/// Immutable once built. The cost is derived from `pricing` and `shape` in
/// [`CostedCandidate::new`] and has no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostedCandidate {
    pricing: MachineFamilyPricing,
    shape: Shape,
    total_daily_cost: UsdPerDay,
}

impl CostedCandidate {
    /// Cost `pricing` for `shape`.
    #[must_use]
    pub fn new(pricing: MachineFamilyPricing, shape: Shape) -> Self {
        let total_daily_cost = cost::daily_cost(&pricing, &shape);
        Self {
            pricing,
            shape,
            total_daily_cost,
        }
    }

    /// The pricing record this candidate was costed from.
    #[must_use]
    pub const fn pricing(&self) -> &MachineFamilyPricing {
        &self.pricing
    }

    /// The shape the cost was computed for.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Daily USD cost of one instance of the shape.
    #[must_use]
    pub const fn total_daily_cost(&self) -> UsdPerDay {
        self.total_daily_cost
    }

    /// Machine family name, shorthand for `pricing().family()`.
    #[must_use]
    pub fn family(&self) -> &str {
        self.pricing.family()
    }

    /// Pricing tier, shorthand for `pricing().tier()`.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.pricing.tier()
    }

    /// Whether the candidate is spot capacity.
    #[must_use]
    pub const fn is_spot(&self) -> bool {
        self.pricing.tier().is_spot()
    }
}

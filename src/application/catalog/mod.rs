//! Price catalog construction.
//!
//! Turns a [`RawPayload`] into one [`MachineFamilyPricing`] per
//! (family, tier) pair. Duplicate rates for the same pair are collapsed by
//! the configured [`DuplicatePolicy`]; pairs missing a core or RAM rate
//! cannot be costed and are dropped with a [`CatalogWarning`].

mod line_item;

pub use line_item::{family_from_description, IgnoreReason, LineItem};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::family::DEFAULT_ARM_FAMILIES;
use crate::domain::{Architecture, MachineFamilyPricing, RawPayload, Tier};
use crate::error::{ConfigError, Result};

/// How to collapse several rates for the same (family, tier).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the lowest rate seen.
    #[default]
    Lowest,
    /// Use the arithmetic mean of all rates seen.
    Average,
}

/// Catalog construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Collapse rule for repeated rates.
    pub duplicate_policy: DuplicatePolicy,
    /// Families that run on ARM; everything else is AMD64.
    pub arm_families: BTreeSet<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            arm_families: DEFAULT_ARM_FAMILIES
                .iter()
                .map(|family| (*family).to_string())
                .collect(),
        }
    }
}

impl CatalogConfig {
    /// Validate the catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when an ARM family entry is blank.
    pub fn validate(&self) -> Result<()> {
        if self.arm_families.iter().any(|family| family.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "catalog.arm_families",
                reason: "family names cannot be empty".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Architecture of `family`.
    #[must_use]
    pub fn architecture_of(&self, family: &str) -> Architecture {
        if self.arm_families.contains(family) {
            Architecture::Arm
        } else {
            Architecture::Amd64
        }
    }
}

/// A non-fatal problem found while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// A (family, tier) had a core rate but no RAM rate, or vice versa.
    IncompleteRates {
        family: String,
        tier: Tier,
        /// `"core"` or `"ram"`.
        missing: &'static str,
    },
    /// Collapsed rates failed domain validation.
    Invalid {
        family: String,
        /// Rendered validation error.
        reason: String,
    },
}

impl std::fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompleteRates {
                family,
                tier,
                missing,
            } => write!(f, "{family} ({tier}) skipped: no {missing} rate"),
            Self::Invalid { family, reason } => write!(f, "{family} skipped: {reason}"),
        }
    }
}

/// Result of a catalog build.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// One record per (family, tier), ordered by family then tier.
    pub pricings: Vec<MachineFamilyPricing>,
    /// Families that were dropped, in build order.
    pub warnings: Vec<CatalogWarning>,
    /// Line items that did not price a predefined machine family.
    pub ignored: usize,
}

#[derive(Debug, Default)]
struct RateSamples {
    core: Vec<Decimal>,
    ram: Vec<Decimal>,
}

/// Builds normalized pricing records from raw provider payloads.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalogBuilder {
    config: CatalogConfig,
}

impl PriceCatalogBuilder {
    /// Create a builder using `config`.
    #[must_use]
    pub const fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Normalize `payload` into the catalog.
    #[must_use]
    pub fn build(&self, payload: &RawPayload) -> Catalog {
        let mut samples: BTreeMap<(&'static str, Tier), RateSamples> = BTreeMap::new();
        let mut ignored: HashMap<IgnoreReason, usize> = HashMap::new();

        for sku in &payload.skus {
            match LineItem::classify(sku) {
                LineItem::CoreRate {
                    family,
                    tier,
                    price,
                } => samples.entry((family, tier)).or_default().core.push(price),
                LineItem::RamRate {
                    family,
                    tier,
                    price,
                } => samples.entry((family, tier)).or_default().ram.push(price),
                LineItem::Ignored(reason) => *ignored.entry(reason).or_default() += 1,
            }
        }

        let mut catalog = Catalog {
            ignored: ignored.values().sum(),
            ..Catalog::default()
        };

        for ((family, tier), rates) in samples {
            let core = self.collapse(&rates.core);
            let ram = self.collapse(&rates.ram);

            let (core, ram) = match (core, ram) {
                (Some(core), Some(ram)) => (core, ram),
                (core, _) => {
                    let missing = if core.is_none() { "core" } else { "ram" };
                    debug!(family, tier = %tier, missing, "Dropping family with incomplete rates");
                    catalog.warnings.push(CatalogWarning::IncompleteRates {
                        family: family.to_string(),
                        tier,
                        missing,
                    });
                    continue;
                }
            };

            match MachineFamilyPricing::try_new(
                family,
                self.config.architecture_of(family),
                core,
                ram,
                tier,
            ) {
                Ok(pricing) => catalog.pricings.push(pricing),
                Err(err) => catalog.warnings.push(CatalogWarning::Invalid {
                    family: family.to_string(),
                    reason: err.to_string(),
                }),
            }
        }

        if !catalog.warnings.is_empty() {
            warn!(
                dropped = catalog.warnings.len(),
                "Some machine families could not be costed"
            );
        }
        debug!(
            records = catalog.pricings.len(),
            ignored = catalog.ignored,
            ?ignored,
            "Built price catalog"
        );

        catalog
    }

    fn collapse(&self, rates: &[Decimal]) -> Option<Decimal> {
        if rates.is_empty() {
            return None;
        }
        match self.config.duplicate_policy {
            DuplicatePolicy::Lowest => rates.iter().min().copied(),
            DuplicatePolicy::Average => {
                // An overflowing sum is far above any plausible rate, and
                // `MachineFamilyPricing::try_new` rejects Decimal::MAX.
                let sum = rates
                    .iter()
                    .try_fold(Decimal::ZERO, |acc, rate| acc.checked_add(*rate));
                Some(sum.map_or(Decimal::MAX, |sum| sum / Decimal::from(rates.len())))
            }
        }
    }
}

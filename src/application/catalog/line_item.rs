//! Classification of raw billing line items.
//!
//! Billing SKUs come in many shapes (licences, disks, GPUs, custom machine
//! surcharges, sole-tenancy premiums...). Only per-vCPU and per-GB "running"
//! rates of predefined machine families feed the catalog; everything else is
//! ignored with a reason.

use rust_decimal::Decimal;

use crate::domain::family::KNOWN_FAMILIES;
use crate::domain::{RawSku, Tier};

/// What a raw line item prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    /// USD per vCPU-hour.
    CoreRate {
        family: &'static str,
        tier: Tier,
        price: Decimal,
    },
    /// USD per GB-hour.
    RamRate {
        family: &'static str,
        tier: Tier,
        price: Decimal,
    },
    Ignored(IgnoreReason),
}

/// Why a line item does not contribute to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    NotInstance,
    CustomMachine,
    NotRunningRate,
    UnknownFamily,
    NoPrice,
}

impl LineItem {
    /// Classify a raw SKU by its description.
    #[must_use]
    pub fn classify(sku: &RawSku) -> Self {
        let desc = sku.description.to_ascii_lowercase();

        if !desc.contains("instance") {
            return Self::Ignored(IgnoreReason::NotInstance);
        }
        if desc.contains("custom") {
            return Self::Ignored(IgnoreReason::CustomMachine);
        }

        let running = desc.contains("running");
        let is_core = running && desc.contains("core");
        let is_ram = running && desc.contains("ram");
        if !(is_core || is_ram) {
            return Self::Ignored(IgnoreReason::NotRunningRate);
        }

        let Some(family) = family_from_description(&desc) else {
            return Self::Ignored(IgnoreReason::UnknownFamily);
        };
        let Some(price) = sku.unit_price else {
            return Self::Ignored(IgnoreReason::NoPrice);
        };

        let tier = if desc.contains("spot") || desc.contains("preemptible") {
            Tier::Spot
        } else {
            Tier::OnDemand
        };

        if is_core {
            Self::CoreRate {
                family,
                tier,
                price,
            }
        } else {
            Self::RamRate {
                family,
                tier,
                price,
            }
        }
    }
}

/// Find the machine family named in a SKU description.
///
/// Matches whole words only, so `n2` never matches inside `n2d`.
#[must_use]
pub fn family_from_description(description: &str) -> Option<&'static str> {
    let lower = description.to_ascii_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    KNOWN_FAMILIES
        .iter()
        .copied()
        .find(|family| words.contains(family))
}

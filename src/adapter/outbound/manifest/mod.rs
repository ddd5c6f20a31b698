//! Manifest rendering for ranked priorities.
//!
//! Renderers receive the ordered [`PriorityEntry`] list plus the echoed run
//! parameters in [`ManifestContext`] and return the complete text to emit.

mod compute_class;
mod table;

pub use compute_class::render_compute_class;
pub use table::render_table;

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Architecture, CostedCandidate, MachineCategory, Shape};

/// Output format for the ranked priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Human-readable cost table.
    Table,
    /// GKE `ComputeClass` YAML.
    #[default]
    ComputeClass,
}

/// One priority in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityEntry {
    /// Machine family, e.g. `n2d`.
    pub family: String,
    /// Whether the entry uses the Spot tier.
    pub spot: bool,
    /// Daily cost of one instance of the shape in USD.
    pub total_daily_cost: Decimal,
}

impl From<&CostedCandidate> for PriorityEntry {
    fn from(candidate: &CostedCandidate) -> Self {
        Self {
            family: candidate.family().to_string(),
            spot: candidate.is_spot(),
            total_daily_cost: candidate.total_daily_cost(),
        }
    }
}

impl PriorityEntry {
    /// `spot` or `on-demand`.
    #[must_use]
    pub const fn tier_label(&self) -> &'static str {
        if self.spot {
            "spot"
        } else {
            "on-demand"
        }
    }
}

/// Run parameters echoed into the manifest.
#[derive(Debug, Clone)]
pub struct ManifestContext {
    /// `metadata.name` of the ComputeClass.
    pub name: String,
    pub region: String,
    pub architecture: Architecture,
    pub shape: Shape,
    /// Ceiling reported in the header comment.
    pub max_daily_cost: Option<Decimal>,
    pub categories: Vec<MachineCategory>,
    /// Attached to every priority, sorted by key.
    pub node_labels: BTreeMap<String, String>,
}

/// Render `entries` in `format`.
#[must_use]
pub fn render(
    format: ManifestFormat,
    context: &ManifestContext,
    entries: &[PriorityEntry],
) -> String {
    match format {
        ManifestFormat::Table => render_table(entries),
        ManifestFormat::ComputeClass => render_compute_class(context, entries),
    }
}

/// Manifest name derived from categories and region (`co-gp-us-central1`).
#[must_use]
pub fn default_name(region: &str, categories: &[MachineCategory]) -> String {
    let mut abbreviations: Vec<&str> = categories.iter().map(|c| c.abbreviation()).collect();
    abbreviations.dedup();
    if abbreviations.is_empty() {
        return region.to_string();
    }
    format!("{}-{region}", abbreviations.join("-"))
}

/// Cost relative to the cheapest entry: `(cheapest)` or `(2.0x)`.
#[must_use]
pub fn comparison(cost: Decimal, cheapest: Decimal) -> String {
    format!("({})", relative_cost(cost, cheapest))
}

/// Unparenthesised form of [`comparison`].
#[must_use]
pub fn relative_cost(cost: Decimal, cheapest: Decimal) -> String {
    if cost == cheapest {
        return "cheapest".to_string();
    }
    if cheapest.is_zero() {
        return "n/a".to_string();
    }
    let ratio =
        (cost / cheapest).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{ratio:.1}x")
}

/// The first entry's cost, which is the cheapest in a ranked list.
fn cheapest(entries: &[PriorityEntry]) -> Decimal {
    entries
        .first()
        .map_or(Decimal::ZERO, |entry| entry.total_daily_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn comparison_labels_cheapest_and_ratios() {
        assert_eq!(comparison(dec!(1.0), dec!(1.0)), "(cheapest)");
        assert_eq!(comparison(dec!(2.0), dec!(1.0)), "(2.0x)");
        assert_eq!(comparison(dec!(1.5), dec!(1.0)), "(1.5x)");
        assert_eq!(comparison(dec!(3.7), dec!(1.0)), "(3.7x)");
    }

    #[test]
    fn comparison_rounds_to_one_decimal() {
        assert_eq!(comparison(dec!(1.56), dec!(1.0)), "(1.6x)");
        assert_eq!(comparison(dec!(1.54), dec!(1.0)), "(1.5x)");
        assert_eq!(comparison(dec!(1), dec!(0)), "(n/a)");
    }

    #[test]
    fn default_name_prefixes_category_abbreviations() {
        assert_eq!(default_name("us-central1", &[]), "us-central1");
        assert_eq!(
            default_name(
                "us-central1",
                &[
                    MachineCategory::ComputeOptimised,
                    MachineCategory::GeneralPurpose
                ]
            ),
            "co-gp-us-central1"
        );
        assert_eq!(
            default_name("us-central1", &[MachineCategory::MemoryOptimised]),
            "mo-us-central1"
        );
    }
}

//! Known Compute Engine machine families and their categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine families recognised in SKU descriptions.
///
/// Order matters when a description names more than one family: the first
/// entry present wins.
pub const KNOWN_FAMILIES: &[&str] = &[
    "n2d", "n2", "n1", "n4", "e2", "c2d", "c2", "c3d", "c3", "c4a", "c4d", "c4", "t2a", "t2d",
    "m1", "m2", "m3", "m4", "a2", "a3", "g1", "g2", "h3", "z3",
];

/// Families that run on ARM unless configuration says otherwise.
pub const DEFAULT_ARM_FAMILIES: &[&str] = &["t2a", "c4a"];

/// Families that accept custom machine types, so any vCPU/RAM shape within
/// the custom memory ratio can be provisioned without a predefined type.
pub const CUSTOM_MACHINE_FAMILIES: &[&str] = &["n1", "n2", "n2d", "n4", "e2"];

/// Workload category a machine family is marketed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MachineCategory {
    GeneralPurpose,
    ComputeOptimised,
    MemoryOptimised,
    StorageOptimised,
    Gpu,
}

impl MachineCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::GeneralPurpose,
        Self::ComputeOptimised,
        Self::MemoryOptimised,
        Self::StorageOptimised,
        Self::Gpu,
    ];

    /// Families belonging to this category.
    #[must_use]
    pub const fn families(self) -> &'static [&'static str] {
        match self {
            Self::GeneralPurpose => &["e2", "g1", "n1", "n2", "n2d", "n4", "t2a", "t2d"],
            Self::ComputeOptimised => &["c2", "c2d", "c3", "c3d", "c4", "c4a", "c4d", "h3"],
            Self::MemoryOptimised => &["m1", "m2", "m3", "m4"],
            Self::StorageOptimised => &["z3"],
            Self::Gpu => &["a2", "a3", "g2"],
        }
    }

    /// Whether `family` belongs to this category.
    #[must_use]
    pub fn contains(self, family: &str) -> bool {
        self.families().contains(&family)
    }

    /// Kebab-case name, as accepted by `--category`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralPurpose => "general-purpose",
            Self::ComputeOptimised => "compute-optimised",
            Self::MemoryOptimised => "memory-optimised",
            Self::StorageOptimised => "storage-optimised",
            Self::Gpu => "gpu",
        }
    }

    /// Short form used in generated manifest names.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::GeneralPurpose => "gp",
            Self::ComputeOptimised => "co",
            Self::MemoryOptimised => "mo",
            Self::StorageOptimised => "so",
            Self::Gpu => "gpu",
        }
    }
}

impl fmt::Display for MachineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_categorised_family_is_known() {
        for category in MachineCategory::ALL {
            for family in category.families() {
                assert!(KNOWN_FAMILIES.contains(family), "{family} is not known");
            }
        }
    }

    #[test]
    fn categories_match_expected_members() {
        assert!(MachineCategory::GeneralPurpose.contains("t2d"));
        assert!(!MachineCategory::GeneralPurpose.contains("c2d"));
        assert!(MachineCategory::ComputeOptimised.contains("c3"));
        assert!(MachineCategory::MemoryOptimised.contains("m4"));
        assert!(MachineCategory::Gpu.contains("g2"));
        assert!(!MachineCategory::Gpu.contains("unknown"));
    }

    #[test]
    fn custom_families_are_general_purpose() {
        for family in CUSTOM_MACHINE_FAMILIES {
            assert!(MachineCategory::GeneralPurpose.contains(family));
        }
    }

    #[test]
    fn longer_names_precede_their_prefixes() {
        let position = |name: &str| KNOWN_FAMILIES.iter().position(|f| *f == name).unwrap();
        assert!(position("n2d") < position("n2"));
        assert!(position("c4a") < position("c4"));
    }
}

//! Command-line interface definitions.
//!
//! `gkecc` takes a region and a workload shape and prints a cost-ranked GKE
//! `ComputeClass` (or a cost table) built from Cloud Billing pricing.

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

use super::paths::CACHE_DIR_ENV;
use crate::adapter::outbound::gcp::PROJECT_ENV;
use crate::adapter::outbound::manifest::ManifestFormat;
use crate::domain::{Architecture, MachineCategory};

/// Region used when none is given.
pub const DEFAULT_REGION: &str = "europe-north1";

/// Generate a GKE ComputeClass with cost-ranked machine family priorities
#[derive(Parser, Debug)]
#[command(name = "gkecc")]
#[command(version)]
#[command(after_help = "\
Examples:
  gkecc europe-north1 --project my-project > computeclass.yaml
  gkecc europe-north1 --skip-validation --max-cost 5 -o computeclass.yaml
  gkecc europe-north1 --arch arm --max-cost 3 --general-purpose
  gkecc us-central1 --vcpus 8 --ram 32 --all --format table
  gkecc europe-north1 2>/dev/null | kubectl apply -f -

Credentials: set GCP_BILLING_API_KEY or GCP_ACCESS_TOKEN. Machine-type
validation needs a project (--project, GOOGLE_CLOUD_PROJECT or
GCLOUD_PROJECT) and GCP_ACCESS_TOKEN.")]
pub struct Cli {
    /// GCP region to price
    #[arg(default_value = DEFAULT_REGION)]
    pub region: String,

    /// Maximum daily cost in USD for a single instance
    #[arg(long, value_name = "DOLLARS", allow_negative_numbers = true)]
    pub max_cost: Option<Decimal>,

    /// Number of vCPUs used for cost calculation
    #[arg(long, value_name = "N", default_value_t = 4, allow_negative_numbers = true)]
    pub vcpus: i64,

    /// RAM in GB used for cost calculation
    #[arg(long, value_name = "GB", default_value = "16", allow_negative_numbers = true)]
    pub ram: Decimal,

    /// CPU architecture to include
    #[arg(long, value_enum, default_value = "amd64")]
    pub arch: ArchChoice,

    /// Node label to attach, KEY=VALUE (repeatable, comma-separable)
    #[arg(long = "node-label", value_name = "KEY=VALUE")]
    pub node_labels: Vec<String>,

    /// Only include families from these categories (repeatable)
    #[arg(long = "category", value_enum, value_name = "CATEGORY")]
    pub categories: Vec<CategoryChoice>,

    /// Include general-purpose families (e2, n2, t2d, ...)
    #[arg(long)]
    pub general_purpose: bool,

    /// Include compute-optimised families (c2, c3, h3, ...)
    #[arg(long)]
    pub compute_optimised: bool,

    /// Include memory-optimised families (m1 to m4)
    #[arg(long)]
    pub memory_optimised: bool,

    /// Include storage-optimised families (z3)
    #[arg(long)]
    pub storage_optimised: bool,

    /// Include GPU families (a2, a3, g2)
    #[arg(long)]
    pub gpu: bool,

    /// Include every category
    #[arg(long)]
    pub all: bool,

    /// GCP project used to list machine types
    #[arg(long, value_name = "PROJECT", env = PROJECT_ENV)]
    pub project: Option<String>,

    /// Skip the machine-type compatibility check
    #[arg(long)]
    pub skip_validation: bool,

    /// ComputeClass name (defaults to the region, prefixed by categories)
    #[arg(long)]
    pub name: Option<String>,

    /// Ignore cached pricing and fetch fresh data
    #[arg(long)]
    pub refresh: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "computeclass")]
    pub format: FormatChoice,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pricing cache directory
    #[arg(long, value_name = "DIR", env = CACHE_DIR_ENV)]
    pub cache_dir: Option<PathBuf>,

    /// Pricing fetch timeout in seconds (overrides settings)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress and status lines on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// CPU architecture accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ArchChoice {
    /// x86-64 families
    #[default]
    Amd64,
    /// ARM families (t2a, c4a)
    Arm,
}

impl From<ArchChoice> for Architecture {
    fn from(choice: ArchChoice) -> Self {
        match choice {
            ArchChoice::Amd64 => Self::Amd64,
            ArchChoice::Arm => Self::Arm,
        }
    }
}

/// Machine category accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CategoryChoice {
    GeneralPurpose,
    ComputeOptimised,
    MemoryOptimised,
    StorageOptimised,
    Gpu,
}

impl Cli {
    /// Categories named by `--category` and the shorthand flags, in the
    /// order given, without repeats.
    #[must_use]
    pub fn requested_categories(&self) -> Vec<MachineCategory> {
        let shorthands = [
            (self.general_purpose, MachineCategory::GeneralPurpose),
            (self.compute_optimised, MachineCategory::ComputeOptimised),
            (self.memory_optimised, MachineCategory::MemoryOptimised),
            (self.storage_optimised, MachineCategory::StorageOptimised),
            (self.gpu, MachineCategory::Gpu),
        ];
        let all = self.all.then_some(MachineCategory::ALL).into_iter().flatten();

        let mut categories: Vec<MachineCategory> = Vec::new();
        let requested = self
            .categories
            .iter()
            .copied()
            .map(MachineCategory::from)
            .chain(shorthands.into_iter().filter_map(|(set, category)| set.then_some(category)))
            .chain(all);
        for category in requested {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

impl From<CategoryChoice> for MachineCategory {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::GeneralPurpose => Self::GeneralPurpose,
            CategoryChoice::ComputeOptimised => Self::ComputeOptimised,
            CategoryChoice::MemoryOptimised => Self::MemoryOptimised,
            CategoryChoice::StorageOptimised => Self::StorageOptimised,
            CategoryChoice::Gpu => Self::Gpu,
        }
    }
}

/// Output format accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatChoice {
    /// Cost table
    Table,
    /// GKE ComputeClass YAML
    #[default]
    #[value(name = "computeclass")]
    ComputeClass,
}

impl From<FormatChoice> for ManifestFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Table => Self::Table,
            FormatChoice::ComputeClass => Self::ComputeClass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["gkecc"]).unwrap();

        assert_eq!(cli.region, "europe-north1");
        assert_eq!(cli.vcpus, 4);
        assert_eq!(cli.ram, dec!(16));
        assert_eq!(cli.arch, ArchChoice::Amd64);
        assert_eq!(cli.format, FormatChoice::ComputeClass);
        assert!(cli.max_cost.is_none());
        assert!(!cli.refresh);
        assert!(!cli.skip_validation);
        assert!(cli.requested_categories().is_empty());
    }

    #[test]
    fn parses_all_options() {
        let cli = Cli::try_parse_from([
            "gkecc",
            "europe-west1",
            "--vcpus",
            "8",
            "--ram",
            "32",
            "--max-cost",
            "10",
            "--arch",
            "arm",
            "--node-label",
            "env=prod",
            "--node-label",
            "team=a,tier=b",
            "--category",
            "compute-optimised",
            "--refresh",
            "--format",
            "table",
            "-o",
            "output.yaml",
        ])
        .unwrap();

        assert_eq!(cli.region, "europe-west1");
        assert_eq!(cli.vcpus, 8);
        assert_eq!(cli.ram, dec!(32));
        assert_eq!(cli.max_cost, Some(dec!(10)));
        assert_eq!(cli.arch, ArchChoice::Arm);
        assert_eq!(cli.node_labels, vec!["env=prod", "team=a,tier=b"]);
        assert_eq!(cli.categories, vec![CategoryChoice::ComputeOptimised]);
        assert!(cli.refresh);
        assert_eq!(cli.format, FormatChoice::Table);
        assert_eq!(cli.output, Some(PathBuf::from("output.yaml")));
    }

    #[test]
    fn all_selects_every_category_in_order() {
        let cli = Cli::try_parse_from(["gkecc", "--all"]).unwrap();
        assert_eq!(cli.requested_categories(), MachineCategory::ALL.to_vec());
    }

    #[test]
    fn shorthand_flags_follow_explicit_categories() {
        let cli = Cli::try_parse_from([
            "gkecc",
            "--gpu",
            "--general-purpose",
            "--category",
            "memory-optimised",
            "--category",
            "gpu",
        ])
        .unwrap();

        assert_eq!(
            cli.requested_categories(),
            vec![
                MachineCategory::MemoryOptimised,
                MachineCategory::Gpu,
                MachineCategory::GeneralPurpose,
            ]
        );
    }

    #[test]
    fn each_shorthand_flag_maps_to_its_category() {
        for (flag, category) in [
            ("--general-purpose", MachineCategory::GeneralPurpose),
            ("--compute-optimised", MachineCategory::ComputeOptimised),
            ("--memory-optimised", MachineCategory::MemoryOptimised),
            ("--storage-optimised", MachineCategory::StorageOptimised),
            ("--gpu", MachineCategory::Gpu),
        ] {
            let cli = Cli::try_parse_from(["gkecc", flag]).unwrap();
            assert_eq!(cli.requested_categories(), vec![category], "{flag}");
        }
    }

    #[test]
    fn project_and_skip_validation_parse() {
        let cli = Cli::try_parse_from([
            "gkecc",
            "--project",
            "my-project",
            "--skip-validation",
        ])
        .unwrap();

        assert_eq!(cli.project.as_deref(), Some("my-project"));
        assert!(cli.skip_validation);
    }

    #[test]
    fn negative_shape_values_reach_validation() {
        let cli = Cli::try_parse_from(["gkecc", "--vcpus", "-2"]).unwrap();
        assert_eq!(cli.vcpus, -2);
    }

    #[test]
    fn unparseable_cost_ceiling_is_rejected() {
        assert!(Cli::try_parse_from(["gkecc", "--max-cost", "cheap"]).is_err());
    }
}

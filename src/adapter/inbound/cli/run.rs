//! Handler for the `gkecc` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::command::Cli;
use super::labels::parse_node_labels;
use super::output::{self, OutputConfig};
use super::paths;
use crate::adapter::outbound::gcp::project_from_env;
use crate::adapter::outbound::manifest::{
    self, default_name, ManifestContext, ManifestFormat, PriorityEntry,
};
use crate::application::filter::FilterCriteria;
use crate::application::pipeline::{PricingSource, RankRequest, RankedPriorities};
use crate::domain::money::format_usd;
use crate::domain::{Architecture, MachineCategory, Shape};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::{build_pipeline, RuntimeOverrides};
use crate::infrastructure::config::settings::Settings;

/// A validated invocation. Building one performs every check that must
/// pass before any network call.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub region: String,
    pub shape: Shape,
    pub architecture: Architecture,
    /// Inclusive daily cost ceiling in USD.
    pub max_daily_cost: Option<Decimal>,
    /// Requested categories, deduplicated, in request order.
    pub categories: Vec<MachineCategory>,
    /// Parsed `--node-label` pairs, sorted by key.
    pub node_labels: BTreeMap<String, String>,
    /// ComputeClass name, validated as a DNS label.
    pub name: String,
    pub format: ManifestFormat,
    /// Destination file; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Bypass the pricing cache.
    pub force_refresh: bool,
}

impl Invocation {
    /// Validate the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns a configuration or domain error for a malformed region or
    /// name, a non-positive shape, a negative cost ceiling, or a malformed
    /// node label.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let region = cli.region.trim().to_string();
        validate_dns_name("region", &region)?;

        if cli.vcpus <= 0 {
            return Err(invalid("vcpus", format!("must be positive, got {}", cli.vcpus)));
        }
        if cli.ram <= Decimal::ZERO {
            return Err(invalid("ram", format!("must be positive, got {}", cli.ram)));
        }
        let shape = Shape::try_new(cli.vcpus, cli.ram)?;

        if let Some(max) = cli.max_cost {
            if max < Decimal::ZERO {
                return Err(invalid("max-cost", format!("cannot be negative, got {max}")));
            }
        }

        let node_labels = parse_node_labels(&cli.node_labels)?;

        let categories = cli.requested_categories();

        let name = match &cli.name {
            Some(name) => {
                let name = name.trim().to_string();
                validate_dns_name("name", &name)?;
                name
            }
            None => default_name(&region, &categories),
        };

        Ok(Self {
            region,
            shape,
            architecture: cli.arch.into(),
            max_daily_cost: cli.max_cost,
            categories,
            node_labels,
            name,
            format: cli.format.into(),
            output: cli.output.clone(),
            force_refresh: cli.refresh,
        })
    }

    /// The pipeline request for this invocation.
    #[must_use]
    pub fn rank_request(&self) -> RankRequest {
        RankRequest {
            region: self.region.clone(),
            shape: self.shape,
            criteria: FilterCriteria::new(self.architecture)
                .with_max_daily_cost(self.max_daily_cost)
                .with_categories(self.categories.clone()),
            force_refresh: self.force_refresh,
        }
    }

    /// Header values for the rendered manifest.
    #[must_use]
    pub fn manifest_context(&self) -> ManifestContext {
        ManifestContext {
            name: self.name.clone(),
            region: self.region.clone(),
            architecture: self.architecture,
            shape: self.shape,
            max_daily_cost: self.max_daily_cost,
            categories: self.categories.clone(),
            node_labels: self.node_labels.clone(),
        }
    }
}

/// Execute the command.
///
/// # Errors
///
/// Returns any validation, settings, provider, filtering or output error.
/// Nothing is written to the primary output unless the run succeeds.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.quiet, cli.verbose));

    let invocation = Invocation::from_cli(&cli)?;
    let settings = Settings::load_or_default(cli.config.as_deref(), &paths::default_config())?;
    settings.logging.init(cli.verbose);
    debug!(?invocation, "Validated invocation");

    let overrides = RuntimeOverrides {
        cache_dir: cli.cache_dir.clone(),
        timeout_secs: cli.timeout,
        project: cli.project.clone().or_else(project_from_env),
        skip_validation: cli.skip_validation,
    };
    if overrides.timeout_secs == Some(0) {
        return Err(invalid("timeout", "must be greater than 0".to_string()));
    }
    let pipeline = build_pipeline(&settings, &overrides, paths::default_cache_dir())?;

    let pb = output::spinner(&format!(
        "Pricing {} in {}",
        invocation.shape,
        output::highlight(&invocation.region)
    ));
    let ranked = match pipeline.run(&invocation.rank_request()).await {
        Ok(ranked) => ranked,
        Err(err) => {
            output::spinner_fail(&pb);
            return Err(err);
        }
    };
    output::spinner_success(
        &pb,
        &format!(
            "Ranked {} priorities ({})",
            ranked.candidates.len(),
            describe_source(&ranked.source)
        ),
    );
    report_warnings(&ranked);

    let entries: Vec<PriorityEntry> = ranked.candidates.iter().map(PriorityEntry::from).collect();
    let content = manifest::render(invocation.format, &invocation.manifest_context(), &entries);
    output::emit(&content, invocation.output.as_deref())?;

    if let Some(first) = entries.first() {
        output::field(
            "cheapest",
            format!(
                "{} {} at {}/day",
                first.family,
                first.tier_label(),
                format_usd(first.total_daily_cost)
            ),
        );
    }
    if let Some(path) = &invocation.output {
        output::success(&format!("Wrote {}", path.display()));
    }
    info!(region = %invocation.region, priorities = entries.len(), "Done");

    Ok(())
}

fn describe_source(source: &PricingSource) -> String {
    let when = source.fetched_at().format("%Y-%m-%d %H:%M UTC");
    match source {
        PricingSource::Cache { .. } => format!("cached {when}"),
        PricingSource::Provider { .. } => "fetched".to_string(),
        PricingSource::StaleCache { .. } => format!("stale cache {when}"),
    }
}

fn report_warnings(ranked: &RankedPriorities) {
    if let PricingSource::StaleCache { fetched_at } = ranked.source {
        output::warning(&format!(
            "pricing fetch failed; using cached pricing from {}",
            fetched_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    for warning in &ranked.catalog_warnings {
        output::detail(&warning.to_string());
    }
    if !ranked.incompatible_families.is_empty() {
        output::detail(&format!(
            "no machine type fits {}: {}",
            ranked.shape,
            ranked.incompatible_families.join(", ")
        ));
    }
}

fn validate_dns_name(field: &'static str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("'{value}' must match [a-z0-9-]+"),
        ))
    }
}

fn invalid(field: &'static str, reason: String) -> crate::error::Error {
    ConfigError::InvalidValue { field, reason }.into()
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::DomainError;
    use crate::error::Error;

    fn invocation(args: &[&str]) -> Result<Invocation> {
        let cli = Cli::try_parse_from(std::iter::once("gkecc").chain(args.iter().copied()))
            .unwrap();
        Invocation::from_cli(&cli)
    }

    fn assert_invalid(result: Result<Invocation>, expected: &str) {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected);
            }
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[test]
    fn defaults_produce_region_named_manifest() {
        let invocation = invocation(&[]).unwrap();

        assert_eq!(invocation.region, "europe-north1");
        assert_eq!(invocation.name, "europe-north1");
        assert_eq!(invocation.shape.vcpus(), 4);
        assert_eq!(invocation.shape.ram_gb(), dec!(16));
        assert_eq!(invocation.format, ManifestFormat::ComputeClass);
    }

    #[test]
    fn categories_prefix_the_default_name() {
        let invocation = invocation(&[
            "us-central1",
            "--category",
            "compute-optimised",
            "--category",
            "general-purpose",
            "--category",
            "compute-optimised",
        ])
        .unwrap();

        assert_eq!(invocation.name, "co-gp-us-central1");
        assert_eq!(invocation.categories.len(), 2);
    }

    #[test]
    fn explicit_name_wins() {
        let invocation = invocation(&["--name", "batch-pool"]).unwrap();
        assert_eq!(invocation.name, "batch-pool");
    }

    #[test]
    fn rejects_bad_region() {
        assert_invalid(invocation(&["Europe_North1"]), "region");
    }

    #[test]
    fn rejects_non_positive_shape() {
        assert_invalid(invocation(&["--vcpus", "0"]), "vcpus");
        assert_invalid(invocation(&["--vcpus", "-2"]), "vcpus");
        assert_invalid(invocation(&["--ram", "0"]), "ram");
    }

    #[test]
    fn shorthand_flags_prefix_the_default_name() {
        let invocation = invocation(&["us-central1", "--all"]).unwrap();

        assert_eq!(invocation.name, "gp-co-mo-so-gpu-us-central1");
        assert_eq!(invocation.categories, MachineCategory::ALL.to_vec());
        assert_eq!(
            invocation.rank_request().criteria.categories,
            MachineCategory::ALL.to_vec()
        );
    }

    #[test]
    fn rejects_oversized_shape() {
        let result = invocation(&["--ram", "79228162514264337593543950335"]);
        match result {
            Err(err @ Error::Domain(DomainError::RamOutOfRange { .. })) => {
                assert_eq!(err.exit_code(), 2);
            }
            other => panic!("expected ram out of range, got {other:?}"),
        }

        let result = invocation(&["--vcpus", "9223372036854775807"]);
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::VcpusOutOfRange { .. }))
        ));
    }

    #[test]
    fn rejects_negative_ceiling() {
        assert_invalid(invocation(&["--max-cost", "-1"]), "max-cost");
    }

    #[test]
    fn rejects_malformed_label() {
        assert_invalid(invocation(&["--node-label", "novalue"]), "node-label");
    }

    #[test]
    fn request_carries_criteria() {
        let invocation = invocation(&["--arch", "arm", "--max-cost", "3", "--refresh"]).unwrap();
        let request = invocation.rank_request();

        assert_eq!(request.criteria.architecture, Architecture::Arm);
        assert_eq!(request.criteria.max_daily_cost, Some(dec!(3)));
        assert!(request.force_refresh);
    }
}

//! Runtime wiring for the production adapters.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::adapter::outbound::cache::FileCache;
use crate::adapter::outbound::gcp::{
    BillingCatalogClient, ComputeEngineClient, Credentials, PROJECT_ENV,
};
use crate::application::catalog::PriceCatalogBuilder;
use crate::application::pipeline::PricingPipeline;
use crate::error::{ConfigError, Result};
use crate::port::MachineTypeProvider;
use crate::infrastructure::config::settings::Settings;

/// The pipeline as wired for real runs.
pub type ProductionPipeline = PricingPipeline<BillingCatalogClient, FileCache>;

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOverrides {
    /// Beats `[cache] dir` and the platform default.
    pub cache_dir: Option<PathBuf>,
    /// Beats `[provider] timeout_secs`.
    pub timeout_secs: Option<u64>,
    /// GCP project for machine-type validation; beats `[compute] project`.
    pub project: Option<String>,
    /// Turn machine-type validation off regardless of settings.
    pub skip_validation: bool,
}

/// Build the production pipeline from settings, overrides and environment
/// credentials.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for `project` when machine-type
/// validation is on but no project is known, and an error if a provider
/// client cannot be constructed.
pub fn build_pipeline(
    settings: &Settings,
    overrides: &RuntimeOverrides,
    default_cache_dir: PathBuf,
) -> Result<ProductionPipeline> {
    let cache_dir = overrides
        .cache_dir
        .clone()
        .or_else(|| settings.cache.dir.clone())
        .unwrap_or(default_cache_dir);
    let timeout = Duration::from_secs(
        overrides
            .timeout_secs
            .unwrap_or(settings.provider.timeout_secs),
    );
    let credentials = Credentials::from_env();

    debug!(
        cache_dir = %cache_dir.display(),
        timeout_secs = timeout.as_secs(),
        credentials = ?credentials,
        "Building pricing pipeline"
    );

    let machine_types = machine_type_provider(settings, overrides, &credentials)?;
    let client = BillingCatalogClient::new(&settings.provider, credentials)?;
    let cache = FileCache::new(cache_dir);
    let catalog = PriceCatalogBuilder::new(settings.catalog.clone());

    Ok(PricingPipeline::new(client, cache, catalog, timeout)
        .with_max_age(settings.cache.max_age())
        .with_machine_types(machine_types))
}

fn machine_type_provider(
    settings: &Settings,
    overrides: &RuntimeOverrides,
    credentials: &Credentials,
) -> Result<Option<Arc<dyn MachineTypeProvider>>> {
    if overrides.skip_validation || !settings.compute.validate {
        debug!("Machine-type validation disabled");
        return Ok(None);
    }

    let project = overrides
        .project
        .as_deref()
        .or(settings.compute.project.as_deref())
        .map(str::trim)
        .filter(|project| !project.is_empty())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "project",
            reason: format!(
                "machine-type validation requires a GCP project ID; \
                 pass --project or set {PROJECT_ENV}, or use --skip-validation"
            ),
        })?;

    debug!(project, "Machine-type validation enabled");
    let client: Arc<dyn MachineTypeProvider> = Arc::new(ComputeEngineClient::new(
        &settings.compute,
        project,
        credentials.clone(),
    )?);
    Ok(Some(client))
}

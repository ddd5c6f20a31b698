//! Pricing-to-priority orchestration.
//!
//! One [`PricingPipeline::run`] processes one region for one shape in a
//! single pass. The cache and providers are injected so tests can swap in
//! in-memory doubles.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::catalog::{CatalogWarning, PriceCatalogBuilder};
use super::compatibility::compatible_families;
use super::filter::FilterCriteria;
use super::rank::rank;
use crate::domain::{CostedCandidate, MachineFamilyPricing, RawPayload, RegionCacheEntry, Shape};
use crate::error::{ProviderError, Result};
use crate::port::{MachineTypeProvider, PricingCache, PricingProvider};

/// Inputs for one ranking run.
#[derive(Debug, Clone)]
pub struct RankRequest {
    /// Region to price, e.g. `europe-north1`.
    pub region: String,
    /// Shape every candidate is costed against.
    pub shape: Shape,
    pub criteria: FilterCriteria,
    /// Skip the cache and always fetch.
    pub force_refresh: bool,
}

/// Where the pricing snapshot for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingSource {
    /// Served from the cache without contacting the provider.
    Cache { fetched_at: DateTime<Utc> },
    /// Fetched from the provider during this run.
    Provider { fetched_at: DateTime<Utc> },
    /// The provider failed transiently and an aged cache entry stood in.
    StaleCache { fetched_at: DateTime<Utc> },
}

impl PricingSource {
    /// When the snapshot was fetched from the provider.
    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        match self {
            Self::Cache { fetched_at }
            | Self::Provider { fetched_at }
            | Self::StaleCache { fetched_at } => *fetched_at,
        }
    }
}

/// Ranked, filtered candidates for one run.
#[derive(Debug, Clone)]
pub struct RankedPriorities {
    pub region: String,
    pub shape: Shape,
    /// Where the pricing snapshot came from.
    pub source: PricingSource,
    /// Cheapest first; never empty.
    pub candidates: Vec<CostedCandidate>,
    /// Families the catalog could not cost.
    pub catalog_warnings: Vec<CatalogWarning>,
    /// Priced families dropped because no machine type in the region can
    /// host the shape. Empty when validation is off.
    pub incompatible_families: Vec<String>,
}

/// Sequences cache, provider, catalog, compatibility, ranking and
/// filtering.
pub struct PricingPipeline<P, C> {
    provider: P,
    cache: C,
    catalog: PriceCatalogBuilder,
    fetch_timeout: Duration,
    max_age: Option<chrono::Duration>,
    machine_types: Option<Arc<dyn MachineTypeProvider>>,
}

impl<P, C> PricingPipeline<P, C>
where
    P: PricingProvider,
    C: PricingCache,
{
    /// Create a pipeline without cache expiry or machine-type validation.
    pub fn new(
        provider: P,
        cache: C,
        catalog: PriceCatalogBuilder,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            catalog,
            fetch_timeout,
            max_age: None,
            machine_types: None,
        }
    }

    /// Treat cache entries older than `max_age` as stale.
    ///
    /// Without a max age a present entry is always reused.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Option<chrono::Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Drop families that cannot host the requested shape, using the
    /// machine types listed by `machine_types`.
    ///
    /// Without a provider every priced family is kept.
    #[must_use]
    pub fn with_machine_types(
        mut self,
        machine_types: Option<Arc<dyn MachineTypeProvider>>,
    ) -> Self {
        self.machine_types = machine_types;
        self
    }

    /// Whether machine-type validation is enabled.
    #[must_use]
    pub fn validates_machine_types(&self) -> bool {
        self.machine_types.is_some()
    }

    /// The pricing provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The pricing cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Run the pipeline for `request`.
    ///
    /// # Errors
    ///
    /// Provider failures without a usable cache entry, machine-type
    /// listing failures, and [`crate::error::Error::NoEligibleInstances`]
    /// when filtering empties the ranking.
    pub async fn run(&self, request: &RankRequest) -> Result<RankedPriorities> {
        let (payload, source) = self
            .resolve_payload(&request.region, request.force_refresh)
            .await?;

        let catalog = self.catalog.build(&payload);
        let (pricings, incompatible_families) = self
            .retain_compatible(&request.region, &request.shape, catalog.pricings)
            .await?;
        let candidates: Vec<CostedCandidate> = pricings
            .into_iter()
            .map(|pricing| CostedCandidate::new(pricing, request.shape))
            .collect();

        let ranked = rank(candidates);
        let candidates = request.criteria.apply(ranked)?;

        info!(
            region = %request.region,
            shape = %request.shape,
            candidates = candidates.len(),
            "Ranked machine families"
        );

        Ok(RankedPriorities {
            region: request.region.clone(),
            shape: request.shape,
            source,
            candidates,
            catalog_warnings: catalog.warnings,
            incompatible_families,
        })
    }

    async fn retain_compatible(
        &self,
        region: &str,
        shape: &Shape,
        pricings: Vec<MachineFamilyPricing>,
    ) -> Result<(Vec<MachineFamilyPricing>, Vec<String>)> {
        let Some(machine_types) = &self.machine_types else {
            return Ok((pricings, Vec::new()));
        };

        info!(region, provider = machine_types.name(), "Listing machine types");
        let offered = tokio::time::timeout(self.fetch_timeout, machine_types.list(region))
            .await
            .map_err(|_| ProviderError::Timeout {
                after: self.fetch_timeout,
            })??;

        let priced: BTreeSet<String> = pricings
            .iter()
            .map(|pricing| pricing.family().to_string())
            .collect();
        let compatible = compatible_families(&offered, shape, &priced);
        let incompatible: Vec<String> = priced.difference(&compatible).cloned().collect();

        if !incompatible.is_empty() {
            info!(region, shape = %shape, families = ?incompatible, "Dropping incompatible families");
        }

        let pricings = pricings
            .into_iter()
            .filter(|pricing| compatible.contains(pricing.family()))
            .collect();
        Ok((pricings, incompatible))
    }

    async fn resolve_payload(
        &self,
        region: &str,
        force_refresh: bool,
    ) -> Result<(RawPayload, PricingSource)> {
        let cached = if force_refresh {
            debug!(region, "Refresh forced, bypassing cache");
            None
        } else {
            self.cache.load(region)
        };

        let stale = match cached {
            Some(entry) if !self.is_stale(&entry) => {
                debug!(region, fetched_at = %entry.fetched_at, "Using cached pricing");
                let source = PricingSource::Cache {
                    fetched_at: entry.fetched_at,
                };
                return Ok((entry.payload, source));
            }
            Some(entry) => {
                info!(region, fetched_at = %entry.fetched_at, "Cached pricing is stale");
                Some(entry)
            }
            None => None,
        };

        match self.fetch(region).await {
            Ok(payload) => {
                let entry = RegionCacheEntry::new(region, Utc::now(), payload);
                if let Err(err) = self.cache.store(&entry) {
                    warn!(region, error = %err, "Failed to store pricing cache");
                }
                let source = PricingSource::Provider {
                    fetched_at: entry.fetched_at,
                };
                Ok((entry.payload, source))
            }
            Err(err) if err.is_retryable() => match stale {
                Some(entry) => {
                    warn!(
                        region,
                        error = %err,
                        fetched_at = %entry.fetched_at,
                        "Pricing fetch failed, falling back to cached pricing"
                    );
                    let source = PricingSource::StaleCache {
                        fetched_at: entry.fetched_at,
                    };
                    Ok((entry.payload, source))
                }
                None => Err(err.into()),
            },
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch(&self, region: &str) -> std::result::Result<RawPayload, ProviderError> {
        info!(region, provider = self.provider.name(), "Fetching pricing");

        let payload = tokio::time::timeout(self.fetch_timeout, self.provider.fetch(region))
            .await
            .map_err(|_| ProviderError::Timeout {
                after: self.fetch_timeout,
            })??;

        if payload.is_empty() {
            return Err(ProviderError::NoPricingData {
                region: region.to_string(),
            });
        }
        debug!(region, skus = payload.len(), "Fetched pricing");
        Ok(payload)
    }

    fn is_stale(&self, entry: &RegionCacheEntry) -> bool {
        self.max_age
            .is_some_and(|max_age| entry.is_older_than(max_age, Utc::now()))
    }
}

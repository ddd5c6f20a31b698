//! Google Cloud adapters.
//!
//! [`BillingCatalogClient`] lists Compute Engine SKUs and keeps those
//! offered in the requested region. [`ComputeEngineClient`] lists the
//! predefined machine types of the region's zones. Credentials come from
//! the environment: an API key (`GCP_BILLING_API_KEY`) or an OAuth access
//! token (`GCP_ACCESS_TOKEN`).

mod client;
mod dto;
mod machine_types;
mod settings;

pub use client::{BillingCatalogClient, Credentials, ACCESS_TOKEN_ENV, API_KEY_ENV};
pub use dto::{ListSkusResponse, MachineTypeAggregatedList, SkuDto};
pub use machine_types::{project_from_env, ComputeEngineClient, LEGACY_PROJECT_ENV, PROJECT_ENV};
pub use settings::{
    BillingCatalogSettings, ComputeEngineSettings, COMPUTE_ENGINE_SERVICE_ID, DEFAULT_API_URL,
    DEFAULT_COMPUTE_API_URL,
};

//! Billing Catalog and Compute Engine API settings.

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

/// Default Cloud Billing API base URL.
pub const DEFAULT_API_URL: &str = "https://cloudbilling.googleapis.com/v1";

/// Default Compute Engine API base URL.
pub const DEFAULT_COMPUTE_API_URL: &str = "https://compute.googleapis.com/compute/v1";

/// Service id of Compute Engine in the billing catalog.
pub const COMPUTE_ENGINE_SERVICE_ID: &str = "6F81-5844-456A";

/// Billing Catalog API configuration (`[provider]` table).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BillingCatalogSettings {
    /// Base URL, overridable for testing against a local stub.
    pub api_url: String,
    /// Billing service whose SKUs are listed.
    pub service_id: String,
    /// Upper bound on the whole paginated fetch.
    pub timeout_secs: u64,
    /// SKUs requested per page.
    pub page_size: u32,
}

impl Default for BillingCatalogSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            service_id: COMPUTE_ENGINE_SERVICE_ID.into(),
            timeout_secs: 60,
            page_size: 5000,
        }
    }
}

impl BillingCatalogSettings {
    /// Validate the provider settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unparseable URL, an empty
    /// service id, or zero timeout / page size.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url).map_err(|err| ConfigError::InvalidValue {
            field: "provider.api_url",
            reason: err.to_string(),
        })?;
        if self.service_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provider.service_id",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.timeout_secs",
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.page_size",
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        Ok(())
    }

    /// URL of the SKU listing for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the base URL is malformed.
    pub fn skus_url(&self) -> Result<Url> {
        let base = self.api_url.trim_end_matches('/');
        let url = format!("{base}/services/{}/skus", self.service_id.trim());
        Url::parse(&url).map_err(|err| {
            ConfigError::InvalidValue {
                field: "provider.api_url",
                reason: err.to_string(),
            }
            .into()
        })
    }
}

/// Compute Engine API configuration (`[compute]` table).
///
/// Used to list the machine types offered in a region, so that families
/// unable to host the requested shape are dropped before ranking.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComputeEngineSettings {
    pub api_url: String,
    /// Project whose machine-type listing is used. The command line and
    /// environment take precedence.
    pub project: Option<String>,
    /// Check machine-type compatibility before ranking.
    pub validate: bool,
    /// Machine-type entries requested per page.
    pub page_size: u32,
}

impl Default for ComputeEngineSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_COMPUTE_API_URL.into(),
            project: None,
            validate: true,
            page_size: 500,
        }
    }
}

impl ComputeEngineSettings {
    /// Validate the compute settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unparseable URL, a blank
    /// project, or a zero page size.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url).map_err(|err| ConfigError::InvalidValue {
            field: "compute.api_url",
            reason: err.to_string(),
        })?;
        if self
            .project
            .as_deref()
            .is_some_and(|project| project.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "compute.project",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "compute.page_size",
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        Ok(())
    }

    /// URL of the aggregated machine-type listing for `project`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the base URL or project
    /// yields a malformed URL.
    pub fn machine_types_url(&self, project: &str) -> Result<Url> {
        let base = self.api_url.trim_end_matches('/');
        let url = format!("{base}/projects/{}/aggregated/machineTypes", project.trim());
        Url::parse(&url).map_err(|err| {
            ConfigError::InvalidValue {
                field: "compute.api_url",
                reason: err.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_compute_engine() {
        let settings = BillingCatalogSettings::default();
        settings.validate().unwrap();

        assert_eq!(
            settings.skus_url().unwrap().as_str(),
            "https://cloudbilling.googleapis.com/v1/services/6F81-5844-456A/skus"
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let settings = BillingCatalogSettings {
            api_url: "http://localhost:8080/v1/".into(),
            ..BillingCatalogSettings::default()
        };
        assert_eq!(
            settings.skus_url().unwrap().as_str(),
            "http://localhost:8080/v1/services/6F81-5844-456A/skus"
        );
    }

    #[test]
    fn rejects_bad_values() {
        let bad_url = BillingCatalogSettings {
            api_url: "not a url".into(),
            ..BillingCatalogSettings::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_timeout = BillingCatalogSettings {
            timeout_secs: 0,
            ..BillingCatalogSettings::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn compute_defaults_validate_against_the_public_api() {
        let settings = ComputeEngineSettings::default();
        settings.validate().unwrap();

        assert!(settings.validate);
        assert_eq!(
            settings.machine_types_url("my-project").unwrap().as_str(),
            "https://compute.googleapis.com/compute/v1/projects/my-project/aggregated/machineTypes"
        );
    }

    #[test]
    fn blank_compute_project_is_rejected() {
        let settings = ComputeEngineSettings {
            project: Some("  ".into()),
            ..ComputeEngineSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}

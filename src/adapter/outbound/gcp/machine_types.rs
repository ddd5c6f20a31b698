//! HTTP client for Compute Engine `machineTypes.aggregatedList`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::client::{classify_status, Credentials, ACCESS_TOKEN_ENV};
use super::dto::MachineTypeAggregatedList;
use super::settings::ComputeEngineSettings;
use crate::domain::MachineType;
use crate::error::{ProviderError, Result};
use crate::port::MachineTypeProvider;

/// Environment variable naming the GCP project.
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

/// Older spelling of [`PROJECT_ENV`], still set by some tooling.
pub const LEGACY_PROJECT_ENV: &str = "GCLOUD_PROJECT";

/// Read the project from the environment, preferring [`PROJECT_ENV`].
pub fn project_from_env() -> Option<String> {
    [PROJECT_ENV, LEGACY_PROJECT_ENV].into_iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// REST client for the Compute Engine machine-type listing of one project.
#[derive(Debug, Clone)]
pub struct ComputeEngineClient {
    http: Client,
    machine_types_url: Url,
    page_size: u32,
    credentials: Credentials,
}

impl ComputeEngineClient {
    /// Build a client listing machine types visible to `project`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a malformed API URL and a provider
    /// error if the HTTP client cannot be constructed.
    pub fn new(
        settings: &ComputeEngineSettings,
        project: &str,
        credentials: Credentials,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gkecc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        Ok(Self {
            http,
            machine_types_url: settings.machine_types_url(project)?,
            page_size: settings.page_size,
            credentials,
        })
    }

    async fn fetch_page(
        &self,
        page_token: Option<&str>,
    ) -> std::result::Result<MachineTypeAggregatedList, ProviderError> {
        let mut request = self
            .http
            .get(self.machine_types_url.clone())
            .query(&[("maxResults", self.page_size.to_string())]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        request = match &self.credentials {
            Credentials::AccessToken(token) => request.bearer_auth(token),
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::None => {
                return Err(ProviderError::Authentication(format!(
                    "no credentials for machine-type validation: set {ACCESS_TOKEN_ENV}"
                )));
            }
        };

        let response = request
            .send()
            .await
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        response
            .json::<MachineTypeAggregatedList>()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

#[async_trait]
impl MachineTypeProvider for ComputeEngineClient {
    async fn list(&self, region: &str) -> std::result::Result<Vec<MachineType>, ProviderError> {
        let mut seen = BTreeSet::new();
        let mut machine_types = Vec::new();
        let mut pages = 0usize;
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            pages += 1;

            for dto in page.in_region(region) {
                if seen.insert(dto.name.clone()) {
                    machine_types.push(MachineType::from(dto));
                }
            }
            debug!(pages, matched = machine_types.len(), "Fetched machine-type page");

            page_token = page.next_page().map(ToOwned::to_owned);
            if page_token.is_none() {
                break;
            }
        }

        info!(region, pages, machine_types = machine_types.len(), "Listed machine types");
        Ok(machine_types)
    }

    fn name(&self) -> &'static str {
        "compute-engine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_fail_as_authentication() {
        let client = ComputeEngineClient::new(
            &ComputeEngineSettings::default(),
            "my-project",
            Credentials::None,
        )
        .unwrap();

        let err = client.list("europe-north1").await.unwrap_err();

        assert!(matches!(err, ProviderError::Authentication(ref detail) if detail.contains(ACCESS_TOKEN_ENV)));
    }

    #[test]
    fn malformed_api_url_is_a_config_error() {
        let settings = ComputeEngineSettings {
            api_url: "not a url".into(),
            ..ComputeEngineSettings::default()
        };
        assert!(ComputeEngineClient::new(&settings, "p", Credentials::None).is_err());
    }
}

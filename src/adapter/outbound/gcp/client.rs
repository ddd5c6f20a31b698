//! HTTP client for `services.skus.list`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

use super::dto::ListSkusResponse;
use super::settings::BillingCatalogSettings;
use crate::domain::{RawPayload, RawSku};
use crate::error::{ProviderError, Result};
use crate::port::PricingProvider;

/// Environment variable holding a Cloud Billing API key.
pub const API_KEY_ENV: &str = "GCP_BILLING_API_KEY";

/// Environment variable holding an OAuth2 access token.
pub const ACCESS_TOKEN_ENV: &str = "GCP_ACCESS_TOKEN";

/// How requests authenticate to the Billing Catalog API.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    AccessToken(String),
    #[default]
    None,
}

impl Credentials {
    /// Read credentials from the environment, preferring the API key.
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(key) = read(API_KEY_ENV) {
            Self::ApiKey(key)
        } else if let Some(token) = read(ACCESS_TOKEN_ENV) {
            Self::AccessToken(token)
        } else {
            Self::None
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Self::None => f.write_str("None"),
        }
    }
}

/// REST client for the Cloud Billing Catalog.
#[derive(Debug, Clone)]
pub struct BillingCatalogClient {
    http: Client,
    skus_url: Url,
    page_size: u32,
    credentials: Credentials,
}

impl BillingCatalogClient {
    /// Build a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a malformed API URL and a provider
    /// error if the HTTP client cannot be constructed.
    pub fn new(settings: &BillingCatalogSettings, credentials: Credentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gkecc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        Ok(Self {
            http,
            skus_url: settings.skus_url()?,
            page_size: settings.page_size,
            credentials,
        })
    }

    async fn fetch_page(
        &self,
        page_token: Option<&str>,
    ) -> std::result::Result<ListSkusResponse, ProviderError> {
        let mut request = self
            .http
            .get(self.skus_url.clone())
            .query(&[("pageSize", self.page_size.to_string())])
            .query(&[("currencyCode", "USD")]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        request = match &self.credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
            Credentials::None => {
                return Err(ProviderError::Authentication(format!(
                    "no credentials: set {API_KEY_ENV} or {ACCESS_TOKEN_ENV}"
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
            .json::<ListSkusResponse>()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

#[async_trait]
impl PricingProvider for BillingCatalogClient {
    async fn fetch(&self, region: &str) -> std::result::Result<RawPayload, ProviderError> {
        let mut skus = Vec::new();
        let mut seen = 0usize;
        let mut pages = 0usize;
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            pages += 1;
            seen += page.skus.len();
            page_token = page.next_page().map(ToOwned::to_owned);

            skus.extend(
                page.skus
                    .into_iter()
                    .filter(|sku| sku.serves(region))
                    .map(RawSku::from),
            );
            debug!(pages, seen, matched = skus.len(), "Fetched SKU page");

            if page_token.is_none() {
                break;
            }
        }

        info!(region, pages, seen, matched = skus.len(), "Fetched billing catalog");

        if skus.is_empty() {
            return Err(ProviderError::NoPricingData {
                region: region.to_string(),
            });
        }
        Ok(RawPayload::new(skus))
    }

    fn name(&self) -> &'static str {
        "cloud-billing"
    }
}

/// Map a non-success HTTP status to a provider error.
pub(crate) fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let detail = format!("HTTP {status}: {}", body_excerpt(body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(detail),
        _ => ProviderError::Network(detail),
    }
}

fn body_excerpt(body: &str) -> &str {
    let body = body.trim();
    match body.char_indices().nth(200) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_distinct_errors() {
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "denied"),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, ""),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "<html>"),
            ProviderError::Network(_)
        ));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let ProviderError::Network(detail) = classify_status(StatusCode::BAD_GATEWAY, &body) else {
            panic!("expected network error");
        };
        assert!(detail.len() < 250);
    }

    #[test]
    fn credentials_are_redacted_in_debug() {
        let credentials = Credentials::ApiKey("secret".into());
        assert_eq!(format!("{credentials:?}"), "ApiKey(<redacted>)");
    }

    #[tokio::test]
    async fn missing_credentials_fail_as_authentication() {
        let client =
            BillingCatalogClient::new(&BillingCatalogSettings::default(), Credentials::None)
                .unwrap();

        let err = client.fetch("europe-north1").await.unwrap_err();

        assert!(matches!(err, ProviderError::Authentication(_)));
    }
}

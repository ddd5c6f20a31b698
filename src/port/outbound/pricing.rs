//! Pricing provider port.

use async_trait::async_trait;

use crate::domain::RawPayload;
use crate::error::ProviderError;

/// Source of raw per-region pricing.
///
/// Implementations must fail with [`ProviderError::Authentication`] for
/// rejected credentials, a retryable variant for transport or rate-limit
/// trouble, and [`ProviderError::NoPricingData`] when the region has no
/// line items. They must not retry internally.
#[async_trait]
pub trait PricingProvider: Send + Sync {
    /// Fetch every pricing line item for `region`.
    async fn fetch(&self, region: &str) -> Result<RawPayload, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

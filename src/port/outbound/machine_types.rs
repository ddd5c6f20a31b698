//! Machine type listing port.

use async_trait::async_trait;

use crate::domain::MachineType;
use crate::error::ProviderError;

/// Source of the predefined machine types offered in a region.
///
/// Error classification follows [`crate::port::PricingProvider`]. An empty
/// list is a valid answer: families that accept custom machine types can
/// still be compatible.
#[async_trait]
pub trait MachineTypeProvider: Send + Sync {
    /// List the machine types available in any zone of `region`, one entry
    /// per name.
    async fn list(&self, region: &str) -> Result<Vec<MachineType>, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

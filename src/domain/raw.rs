//! Raw provider snapshot as fetched and cached.
//!
//! These records keep provider line items close to their wire form so the
//! cache holds exactly what the provider returned for a region.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single billing line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSku {
    pub sku_id: String,
    /// Human-readable SKU text the catalog classifies.
    pub description: String,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_unit: Option<String>,
    /// Price per usage unit in USD; absent when the SKU has no tiered rate.
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

/// The line items returned for one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPayload {
    pub skus: Vec<RawSku>,
}

impl RawPayload {
    /// Wrap fetched SKUs.
    #[must_use]
    pub fn new(skus: Vec<RawSku>) -> Self {
        Self { skus }
    }

    /// Number of SKUs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skus.len()
    }

    /// Whether the payload has no SKUs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }
}

/// On-disk snapshot of one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCacheEntry {
    pub region: String,
    /// When the payload was fetched from the provider.
    pub fetched_at: DateTime<Utc>,
    /// The regional SKUs as fetched.
    pub payload: RawPayload,
}

impl RegionCacheEntry {
    #[must_use]
    pub fn new(region: impl Into<String>, fetched_at: DateTime<Utc>, payload: RawPayload) -> Self {
        Self {
            region: region.into(),
            fetched_at,
            payload,
        }
    }

    /// Whether the entry is older than `max_age` at `now`.
    #[must_use]
    pub fn is_older_than(&self, max_age: chrono::Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.fetched_at) > max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn age_is_measured_from_fetch_time() {
        let now = Utc::now();
        let entry = RegionCacheEntry::new(
            "europe-north1",
            now - Duration::hours(25),
            RawPayload::default(),
        );

        assert!(entry.is_older_than(Duration::hours(24), now));
        assert!(!entry.is_older_than(Duration::hours(48), now));
    }
}

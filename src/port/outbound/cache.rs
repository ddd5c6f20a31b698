//! Pricing cache port.

use crate::domain::RegionCacheEntry;
use crate::error::CacheError;

/// Per-region store for the last successful pricing fetch.
pub trait PricingCache: Send + Sync {
    /// Load the entry for `region`.
    ///
    /// Missing, unreadable and corrupt entries all return `None`.
    fn load(&self, region: &str) -> Option<RegionCacheEntry>;

    /// Store `entry`, replacing any prior entry for its region as a whole.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] when the entry cannot be written; a reader
    /// still sees the previous complete entry.
    fn store(&self, entry: &RegionCacheEntry) -> Result<(), CacheError>;
}

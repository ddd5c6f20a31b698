//! In-memory pricing cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::domain::RegionCacheEntry;
use crate::error::CacheError;
use crate::port::PricingCache;

/// In-memory cache, used by tests and as a no-persistence fallback.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, RegionCacheEntry>>,
    stores: AtomicUsize,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache seeded with `entry`.
    pub fn with_entry(entry: RegionCacheEntry) -> Self {
        let cache = Self::new();
        cache.entries.write().insert(entry.region.clone(), entry);
        cache
    }

    /// Number of successful `store` calls.
    pub fn stores(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }
}

impl PricingCache for MemoryCache {
    fn load(&self, region: &str) -> Option<RegionCacheEntry> {
        self.entries.read().get(region).cloned()
    }

    fn store(&self, entry: &RegionCacheEntry) -> Result<(), CacheError> {
        self.entries
            .write()
            .insert(entry.region.clone(), entry.clone());
        self.stores.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

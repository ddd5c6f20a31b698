//! Pricing cache settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Largest accepted `max_age_hours` (about a century).
pub const MAX_AGE_HOURS_LIMIT: u64 = 24 * 366 * 100;

/// Cache configuration (`[cache]` table).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Cache directory; the platform cache dir when unset.
    pub dir: Option<PathBuf>,
    /// Entries older than this are refetched. Unset means entries never age.
    pub max_age_hours: Option<u64>,
}

impl CacheSettings {
    /// Validate the cache settings.
    ///
    /// # Errors
    ///
    /// Returns an error when `max_age_hours` is zero or above
    /// [`MAX_AGE_HOURS_LIMIT`].
    pub fn validate(&self) -> Result<()> {
        match self.max_age_hours {
            Some(0) => Err(ConfigError::InvalidValue {
                field: "cache.max_age_hours",
                reason: "must be greater than 0".into(),
            }
            .into()),
            Some(hours) if hours > MAX_AGE_HOURS_LIMIT => Err(ConfigError::InvalidValue {
                field: "cache.max_age_hours",
                reason: format!("must be at most {MAX_AGE_HOURS_LIMIT}, got {hours}"),
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// Maximum cache entry age, if configured and representable.
    #[must_use]
    pub fn max_age(&self) -> Option<chrono::Duration> {
        self.max_age_hours
            .and_then(|hours| i64::try_from(hours).ok())
            .and_then(chrono::Duration::try_hours)
    }
}

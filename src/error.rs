use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Architecture, DomainError, MachineCategory};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {}", .path.display(), .source.message())]
    Parse {
        path: PathBuf,
        src: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Pricing provider failures, kept distinct so the caller can decide
/// whether a cached snapshot may stand in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limited by pricing provider: {0}")]
    RateLimited(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("pricing fetch timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    #[error("failed to decode pricing response: {0}")]
    Decode(String),

    #[error("no pricing data for region {region}")]
    NoPricingData { region: String },
}

impl ProviderError {
    /// Transient failures that a stale cache entry may paper over.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Network(_) | Self::Timeout { .. } | Self::Decode(_)
        )
    }
}

/// Pricing cache failures.
///
/// Read-side corruption never leaves the cache adapter: it is logged and
/// reported to callers as a miss.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache entry {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("cache I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level error. [`Error::exit_code`] maps each category to the
/// process exit status.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Filtering removed every ranked candidate. Carries the criteria so the
    /// message can say what was asked for.
    #[error(
        "no eligible instances: {considered} candidates, none match architecture {architecture}{}{}",
        categories_suffix(.categories),
        ceiling_suffix(.max_daily_cost)
    )]
    NoEligibleInstances {
        architecture: Architecture,
        categories: Vec<MachineCategory>,
        max_daily_cost: Option<Decimal>,
        /// Candidates that reached filtering.
        considered: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn categories_suffix(categories: &[MachineCategory]) -> String {
    if categories.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = categories.iter().map(|category| category.as_str()).collect();
    format!(" in categories [{}]", names.join(", "))
}

fn ceiling_suffix(max_daily_cost: &Option<Decimal>) -> String {
    max_daily_cost
        .map(|max| format!(" within ${max}/day"))
        .unwrap_or_default()
}

impl Error {
    /// Process exit code for this error category.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Domain(_) => 2,
            Self::NoEligibleInstances { .. } => 3,
            Self::Provider(ProviderError::Authentication(_)) => 4,
            Self::Provider(err) if err.is_retryable() => 5,
            _ => 1,
        }
    }
}

/// Result alias for fallible gkecc operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn retryable_provider_errors() {
        assert!(ProviderError::Network("reset".into()).is_retryable());
        assert!(ProviderError::RateLimited("429".into()).is_retryable());
        assert!(ProviderError::Timeout {
            after: Duration::from_secs(30)
        }
        .is_retryable());
        assert!(!ProviderError::Authentication("403".into()).is_retryable());
        assert!(!ProviderError::NoPricingData {
            region: "mars-1".into()
        }
        .is_retryable());
    }

    #[test]
    fn exit_codes_separate_categories() {
        let config: Error = ConfigError::InvalidValue {
            field: "node-label",
            reason: "missing '='".into(),
        }
        .into();
        let empty = Error::NoEligibleInstances {
            architecture: Architecture::Amd64,
            categories: Vec::new(),
            max_daily_cost: Some(dec!(0.5)),
            considered: 4,
        };
        let auth: Error = ProviderError::Authentication("denied".into()).into();
        let network: Error = ProviderError::Network("reset".into()).into();

        assert_eq!(config.exit_code(), 2);
        assert_eq!(empty.exit_code(), 3);
        assert_eq!(auth.exit_code(), 4);
        assert_eq!(network.exit_code(), 5);
        assert_ne!(empty.exit_code(), 0);
    }

    #[test]
    fn no_eligible_message_names_the_ceiling() {
        let err = Error::NoEligibleInstances {
            architecture: Architecture::Arm,
            categories: Vec::new(),
            max_daily_cost: Some(dec!(0.5)),
            considered: 2,
        };
        assert_eq!(
            err.to_string(),
            "no eligible instances: 2 candidates, none match architecture arm within $0.5/day"
        );
    }

    #[test]
    fn no_eligible_message_names_every_criterion() {
        let err = Error::NoEligibleInstances {
            architecture: Architecture::Amd64,
            categories: vec![MachineCategory::GeneralPurpose, MachineCategory::Gpu],
            max_daily_cost: Some(dec!(0.5)),
            considered: 6,
        };
        assert_eq!(
            err.to_string(),
            "no eligible instances: 6 candidates, none match architecture amd64 \
             in categories [general-purpose, gpu] within $0.5/day"
        );

        let unbounded = Error::NoEligibleInstances {
            architecture: Architecture::Amd64,
            categories: vec![MachineCategory::StorageOptimised],
            max_daily_cost: None,
            considered: 0,
        };
        assert_eq!(
            unbounded.to_string(),
            "no eligible instances: 0 candidates, none match architecture amd64 \
             in categories [storage-optimised]"
        );
    }
}

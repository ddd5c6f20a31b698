//! Settings file loading and validation.
//!
//! The settings file is optional. Every section falls back to built-in
//! defaults, so an empty file and a missing default file are equivalent.
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [provider]
//! timeout_secs = 30
//!
//! [compute]
//! project = "my-project"
//! validate = true
//!
//! [cache]
//! max_age_hours = 24
//!
//! [catalog]
//! duplicate_policy = "average"
//! arm_families = ["t2a", "c4a"]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::cache::CacheSettings;
use super::logging::LoggingConfig;
use crate::adapter::outbound::gcp::{BillingCatalogSettings, ComputeEngineSettings};
use crate::application::catalog::CatalogConfig;
use crate::error::{ConfigError, Result};

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingConfig,
    /// Billing Catalog client (`[provider]`).
    pub provider: BillingCatalogSettings,
    /// Machine-type validation (`[compute]`).
    pub compute: ComputeEngineSettings,
    /// Pricing cache location and expiry (`[cache]`).
    pub cache: CacheSettings,
    pub catalog: CatalogConfig,
}

impl Settings {
    /// Parse settings from TOML text. `path` is only used for error reports.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            src: content.to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist, plus
    /// the errors of [`Settings::parse_toml`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse_toml(&content, path)
    }

    /// Load an explicitly requested file, or the default file if present.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields the built-in defaults.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn load_or_default(explicit: Option<&Path>, default_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if default_path.is_file() {
            return Self::load(default_path);
        }
        debug!(path = %default_path.display(), "No settings file, using defaults");
        Ok(Self::default())
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        self.provider.validate()?;
        self.compute.validate()?;
        self.cache.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::catalog::DuplicatePolicy;
    use crate::error::Error;

    fn parse(content: &str) -> Result<Settings> {
        Settings::parse_toml(content, &PathBuf::from("config.toml"))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.provider.timeout_secs, 60);
        assert!(settings.catalog.arm_families.contains("t2a"));
        assert!(settings.compute.validate);
    }

    #[test]
    fn sections_override_defaults() {
        let settings = parse(
            r#"
[logging]
level = "debug"
format = "json"

[provider]
timeout_secs = 15

[compute]
project = "billing-lab"
validate = false

[cache]
dir = "/tmp/gkecc"
max_age_hours = 6

[catalog]
duplicate_policy = "average"
arm_families = ["t2a"]
"#,
        )
        .unwrap();

        assert_eq!(settings.logging.format, "json");
        assert_eq!(settings.provider.timeout_secs, 15);
        assert_eq!(settings.compute.project.as_deref(), Some("billing-lab"));
        assert!(!settings.compute.validate);
        assert_eq!(settings.cache.dir, Some(PathBuf::from("/tmp/gkecc")));
        assert_eq!(settings.cache.max_age_hours, Some(6));
        assert_eq!(settings.catalog.duplicate_policy, DuplicatePolicy::Average);
        assert!(!settings.catalog.arm_families.contains("c4a"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("[provider\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn unknown_duplicate_policy_is_a_parse_error() {
        let err = parse("[catalog]\nduplicate_policy = \"median\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = parse("[provider]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "provider.timeout_secs",
                ..
            })
        ));

        let err = parse("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            })
        ));
    }

    #[test]
    fn huge_max_age_fails_validation() {
        let err = parse("[cache]\nmax_age_hours = 9223372036854775807\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "cache.max_age_hours",
                ..
            })
        ));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Settings::load_or_default(Some(&missing), &missing).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));

        let settings = Settings::load_or_default(None, &missing).unwrap();
        assert_eq!(settings, Settings::default());
    }
}

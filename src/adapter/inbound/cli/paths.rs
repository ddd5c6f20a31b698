//! Path utilities for gkecc.
//!
//! - `$XDG_CONFIG_HOME/gkecc/config.toml` - optional settings file
//! - `$XDG_CACHE_HOME/gkecc/<region>.json` - per-region pricing cache

use std::path::PathBuf;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "GKECC_CACHE_DIR";

/// Returns the default config file path.
pub fn default_config() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gkecc")
        .join("config.toml")
}

/// Returns the default pricing cache directory.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gkecc")
}

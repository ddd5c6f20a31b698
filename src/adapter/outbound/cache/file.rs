//! File-backed pricing cache.
//!
//! Each region lives in `<dir>/<region>.json`. Writes go to a temporary file
//! in the same directory which is then renamed over the target, so readers
//! see either the previous entry or the new one, never a partial file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::RegionCacheEntry;
use crate::error::CacheError;
use crate::port::PricingCache;

/// Pricing cache stored as JSON files under a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Cache storing one file per region under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for `region`.
    #[must_use]
    pub fn path_for(&self, region: &str) -> PathBuf {
        self.dir.join(format!("{region}.json"))
    }

    /// Read and validate the entry for `region`.
    ///
    /// Returns `Ok(None)` when no entry exists.
    ///
    /// # Errors
    ///
    /// [`CacheError::Io`] for unreadable files and [`CacheError::Corrupt`]
    /// for content that does not decode to an entry for `region`.
    pub fn read_entry(&self, region: &str) -> Result<Option<RegionCacheEntry>, CacheError> {
        let path = self.path_for(region);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        let entry: RegionCacheEntry =
            serde_json::from_str(&contents).map_err(|err| CacheError::Corrupt {
                path: path.clone(),
                reason: err.to_string(),
            })?;

        if entry.region != region {
            return Err(CacheError::Corrupt {
                path,
                reason: format!("entry is for region {}", entry.region),
            });
        }
        Ok(Some(entry))
    }

    fn write_entry(&self, entry: &RegionCacheEntry) -> Result<PathBuf, CacheError> {
        let path = self.path_for(&entry.region);
        let io_err = |source: io::Error| CacheError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut tmp, entry)?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|err| io_err(err.error))?;

        Ok(path)
    }
}

impl PricingCache for FileCache {
    fn load(&self, region: &str) -> Option<RegionCacheEntry> {
        match self.read_entry(region) {
            Ok(Some(entry)) => {
                debug!(region, path = %self.path_for(region).display(), "Cache hit");
                Some(entry)
            }
            Ok(None) => {
                debug!(region, "Cache miss");
                None
            }
            Err(err) => {
                warn!(region, error = %err, "Ignoring unusable cache entry");
                None
            }
        }
    }

    fn store(&self, entry: &RegionCacheEntry) -> Result<(), CacheError> {
        let path = self.write_entry(entry)?;
        debug!(region = %entry.region, path = %path.display(), "Stored pricing cache");
        Ok(())
    }
}

//! Disk-based route cache, one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use super::{CacheError, RouteCache};

/// Configuration for the disk cache.
#[derive(Debug, Clone)]
pub struct FileCacheConfig {
    /// Directory holding the cache files.
    pub dir: PathBuf,
    /// How long an entry remains valid. `None` keeps entries forever.
    pub ttl: Option<Duration>,
}

impl FileCacheConfig {
    /// Create a new cache config rooted at `dir`, with no expiry.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: None,
        }
    }

    /// Expire entries older than `ttl`, measured from the file's mtime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        // Cache files live next to wherever the tool is run from
        Self::new(".")
    }
}

/// Disk cache for route listings.
#[derive(Debug, Clone)]
pub struct FileCache {
    config: FileCacheConfig,
}

impl FileCache {
    /// Create a new disk cache with the given config.
    pub fn new(config: FileCacheConfig) -> Self {
        Self { config }
    }

    /// Path of the file backing `key`.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced with `_` so a key can
    /// never escape the cache directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.config.dir.join(format!("{name}.json"))
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Option<Duration> {
        self.config.ttl
    }

    fn is_expired(&self, path: &Path) -> bool {
        let Some(ttl) = self.config.ttl else {
            return false;
        };

        let age = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .unwrap_or_default();

        age >= ttl
    }
}

impl RouteCache for FileCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.path_for(key);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable cache file, ignoring");
                return None;
            }
        };

        if self.is_expired(&path) {
            debug!(path = %path.display(), "cache entry expired");
            return None;
        }

        Some(bytes)
    }

    /// Creates the cache directory if it doesn't exist.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&path, bytes).map_err(|source| CacheError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "wrote cache file");
        Ok(())
    }
}

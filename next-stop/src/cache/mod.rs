//! Route listing cache.
//!
//! Routes serving a stop change rarely, so the raw routes response is kept
//! per stop and reused on later runs. The cache only stores opaque bytes;
//! the resolver decides what goes in them.

mod file;
mod memory;

use std::path::PathBuf;

pub use file::{FileCache, FileCacheConfig};
pub use memory::MemoryCache;

/// A failed cache write. Never fatal: callers log it and carry on.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to create cache directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write cache file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Key-value store for route listings.
pub trait RouteCache {
    /// Bytes stored under `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `bytes` under `key`, replacing any previous entry.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError>;
}

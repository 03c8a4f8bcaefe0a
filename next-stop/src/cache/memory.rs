//! In-memory route cache.
//!
//! Backed by a bounded moka cache. Useful for tests and for long-lived
//! embedders that don't want files on disk.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache as MokaCache;

use super::{CacheError, RouteCache};

/// Default maximum number of cached stops.
const DEFAULT_MAX_CAPACITY: u64 = 1000;

/// In-memory cache for route listings.
#[derive(Clone)]
pub struct MemoryCache {
    entries: MokaCache<String, Arc<[u8]>>,
}

impl MemoryCache {
    /// Create a cache whose entries never expire.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a cache whose entries expire `ttl` after insertion.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::build(Some(ttl))
    }

    fn build(ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder().max_capacity(DEFAULT_MAX_CAPACITY);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).map(|bytes| bytes.to_vec())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), Arc::from(bytes));
        Ok(())
    }
}

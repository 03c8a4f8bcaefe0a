//! Route resolution with a local cache.
//!
//! The routes serving a stop are looked up once and the raw API listing is
//! kept in the route cache under `stop_<id>`. Later runs parse the cached
//! listing instead of asking the API again. Only an absent or empty entry
//! triggers a remote lookup; a cached entry that fails to parse is an error,
//! not a cache miss.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, warn};

use crate::cache::RouteCache;
use crate::domain::{DataFormatError, Route, StopId};
use crate::error::Error;
use crate::mbta::{TransitSource, parse_routes};

/// Resolves the routes serving a stop.
pub struct RouteResolver<'a, S, C> {
    source: &'a S,
    cache: &'a C,
}

impl<'a, S: TransitSource, C: RouteCache> RouteResolver<'a, S, C> {
    pub fn new(source: &'a S, cache: &'a C) -> Self {
        Self { source, cache }
    }

    /// Routes serving `stop`, each with its ordered direction names.
    ///
    /// A successful remote lookup is written back to the cache. Failing to
    /// write is logged and otherwise ignored.
    pub async fn resolve_routes(&self, stop: &StopId) -> Result<Vec<Route>, Error> {
        let key = stop.cache_key();

        if let Some(bytes) = self.cache.get(&key) {
            let raw = decode_listing(&bytes)?;
            if !raw.is_empty() {
                debug!(%stop, routes = raw.len(), "route listing from cache");
                return Ok(parse_routes(&raw)?);
            }
            debug!(%stop, "cached route listing is empty");
        }

        let raw = self.source.routes_for_stop(stop).await?;
        let routes = parse_routes(&raw)?;
        debug!(%stop, routes = routes.len(), "route listing from API");

        if !raw.is_empty() {
            self.persist(&key, &raw);
        }

        Ok(routes)
    }

    fn persist(&self, key: &str, raw: &[Value]) {
        let bytes = match encode_listing(raw) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize route listing");
                return;
            }
        };

        if let Err(e) = self.cache.put(key, &bytes) {
            warn!(key, error = %e, "failed to cache route listing");
        }
    }
}

/// Parse a cached listing. Blank content counts as an empty listing.
pub fn decode_listing(bytes: &[u8]) -> Result<Vec<Value>, DataFormatError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes).map_err(|e| DataFormatError::json("route cache entry", e))
}

/// Serialize a listing the way it is stored: pretty-printed with four-space
/// indents, non-ASCII left as-is.
pub fn encode_listing(raw: &[Value]) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    raw.serialize(&mut serializer)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, FileCache, FileCacheConfig, MemoryCache};
    use crate::domain::RouteId;
    use crate::mbta::MockSource;
    use serde_json::json;
    use tempfile::tempdir;

    fn stop() -> StopId {
        StopId::new("place-sstat")
    }

    fn listing() -> Vec<Value> {
        vec![
            json!({
                "type": "route",
                "id": "Red",
                "attributes": {"direction_names": ["South", "North"], "long_name": "Red Line"}
            }),
            json!({
                "type": "route",
                "id": 7,
                "attributes": {"direction_names": ["Outbound", "Inbound"], "long_name": "City Point - Otis Street & Summer Street"}
            }),
        ]
    }

    /// Cache whose writes always fail.
    struct ReadOnlyCache;

    impl RouteCache for ReadOnlyCache {
        fn get(&self, _key: &str) -> Option<Vec<u8>> {
            None
        }

        fn put(&self, key: &str, _bytes: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::Write {
                path: key.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[tokio::test]
    async fn remote_lookup_populates_cache() {
        let source = MockSource::new().with_routes(stop(), listing());
        let cache = MemoryCache::new();
        let resolver = RouteResolver::new(&source, &cache);

        let routes = resolver.resolve_routes(&stop()).await.unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].id, RouteId::new("Red"));
        assert_eq!(routes[1].id, RouteId::new("7"));
        assert_eq!(routes[1].direction_names, vec!["Outbound", "Inbound"]);
        assert_eq!(source.route_calls(), 1);
        assert!(cache.get("stop_place-sstat").is_some());
    }

    #[tokio::test]
    async fn second_lookup_uses_cache() {
        let source = MockSource::new().with_routes(stop(), listing());
        let cache = MemoryCache::new();
        let resolver = RouteResolver::new(&source, &cache);

        let first = resolver.resolve_routes(&stop()).await.unwrap();
        let second = resolver.resolve_routes(&stop()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.route_calls(), 1);
    }

    #[tokio::test]
    async fn disk_cache_round_trip() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(FileCacheConfig::new(dir.path()));
        let source = MockSource::new().with_routes(stop(), listing());

        let fetched = RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        // A fresh source with no data proves the second read is cache-only
        let empty_source = MockSource::new();
        let reloaded = RouteResolver::new(&empty_source, &cache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        assert_eq!(fetched, reloaded);
        assert_eq!(empty_source.route_calls(), 0);
    }

    #[tokio::test]
    async fn cache_file_keeps_raw_listing() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(FileCacheConfig::new(dir.path()));
        let raw = vec![json!({
            "id": "CR-Worcester",
            "attributes": {"direction_names": ["Outbound", "Inbound"], "long_name": "Framingham/Worcester Line – Zone 8"}
        })];
        let source = MockSource::new().with_routes(stop(), raw.clone());

        RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("stop_place-sstat.json")).unwrap();
        assert!(contents.contains("Zone 8"));
        assert!(contents.contains('–'));
        assert!(contents.contains("\n        \"id\": \"CR-Worcester\""));
        let stored: Vec<Value> = serde_json::from_str(&contents).unwrap();
        assert_eq!(stored, raw);
    }

    #[tokio::test]
    async fn empty_cache_entry_falls_back_to_remote() {
        let source = MockSource::new().with_routes(stop(), listing());
        let cache = MemoryCache::new();
        cache.put("stop_place-sstat", b"[]").unwrap();

        let routes = RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(source.route_calls(), 1);
    }

    #[tokio::test]
    async fn blank_cache_file_falls_back_to_remote() {
        let source = MockSource::new().with_routes(stop(), listing());
        let cache = MemoryCache::new();
        cache.put("stop_place-sstat", b"  \n").unwrap();

        let routes = RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        assert_eq!(routes.len(), 2);
    }

    #[tokio::test]
    async fn malformed_cache_entry_is_an_error() {
        let source = MockSource::new().with_routes(stop(), listing());
        let cache = MemoryCache::new();
        cache.put("stop_place-sstat", b"{not json").unwrap();

        let result = RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await;

        assert!(matches!(
            result,
            Err(Error::DataFormat(DataFormatError::Json { context: "route cache entry", .. }))
        ));
        assert_eq!(source.route_calls(), 0);
    }

    #[tokio::test]
    async fn cached_entry_with_wrong_shape_is_an_error() {
        let source = MockSource::new();
        let cache = MemoryCache::new();
        cache
            .put("stop_place-sstat", br#"[{"id": "Red", "attributes": {}}]"#)
            .unwrap();

        let result = RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await;

        assert!(matches!(result, Err(Error::DataFormat(_))));
        assert_eq!(source.route_calls(), 0);
    }

    #[tokio::test]
    async fn cache_write_failure_is_not_fatal() {
        let source = MockSource::new().with_routes(stop(), listing());

        let routes = RouteResolver::new(&source, &ReadOnlyCache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        assert_eq!(routes.len(), 2);
    }

    #[tokio::test]
    async fn empty_remote_listing_is_not_cached() {
        let source = MockSource::new();
        let cache = MemoryCache::new();

        let routes = RouteResolver::new(&source, &cache)
            .resolve_routes(&stop())
            .await
            .unwrap();

        assert!(routes.is_empty());
        assert!(cache.get("stop_place-sstat").is_none());
    }

    #[test]
    fn encode_uses_four_space_indent() {
        let bytes = encode_listing(&[json!({"id": "Red"})]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "[\n    {\n        \"id\": \"Red\"\n    }\n]"
        );
    }
}

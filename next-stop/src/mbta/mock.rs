//! In-memory transit source for testing without API access.
//!
//! Serves canned JSON resources as if they were live API responses, and
//! counts how many queries were made so callers can assert on cache hits.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::domain::{RouteId, SourceKind, StopId};
use crate::error::Error;

use super::error::TransportError;
use super::source::TransitSource;
use super::types::{ArrivalResource, parse_arrival};

type ArrivalKey = (SourceKind, RouteId, StopId);

/// Mock transit source that serves canned resources.
#[derive(Debug, Default)]
pub struct MockSource {
    routes: HashMap<StopId, Vec<Value>>,
    arrivals: HashMap<ArrivalKey, Vec<Value>>,
    unavailable_routes: HashSet<RouteId>,
    route_calls: AtomicUsize,
    arrival_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `resources` as the routes listing for `stop`.
    pub fn with_routes(mut self, stop: StopId, resources: Vec<Value>) -> Self {
        self.routes.insert(stop, resources);
        self
    }

    /// Serve `resources` for `kind` queries on `route` at `stop`.
    pub fn with_arrivals(
        mut self,
        kind: SourceKind,
        route: RouteId,
        stop: StopId,
        resources: Vec<Value>,
    ) -> Self {
        self.arrivals.insert((kind, route, stop), resources);
        self
    }

    /// Make every arrival query for `route` fail with a 503.
    pub fn with_unavailable_route(mut self, route: RouteId) -> Self {
        self.unavailable_routes.insert(route);
        self
    }

    /// Number of routes queries served so far.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    /// Number of prediction and schedule queries served so far.
    pub fn arrival_calls(&self) -> usize {
        self.arrival_calls.load(Ordering::SeqCst)
    }
}

impl TransitSource for MockSource {
    async fn routes_for_stop(&self, stop: &StopId) -> Result<Vec<Value>, Error> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.routes.get(stop).cloned().unwrap_or_default())
    }

    async fn arrivals(
        &self,
        kind: SourceKind,
        route: &RouteId,
        stop: &StopId,
        limit: u8,
    ) -> Result<Vec<ArrivalResource>, Error> {
        self.arrival_calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable_routes.contains(route) {
            return Err(TransportError::Api {
                status: 503,
                message: format!("mock outage for route {route}"),
            }
            .into());
        }

        let key = (kind, route.clone(), stop.clone());
        let Some(resources) = self.arrivals.get(&key) else {
            return Ok(Vec::new());
        };

        let parsed = resources
            .iter()
            .take(usize::from(limit))
            .map(parse_arrival)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parsed)
    }
}

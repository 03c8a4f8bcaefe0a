//! The full arrival lookup for one stop.
//!
//! Resolves the routes serving the stop, fetches arrivals for each route in
//! listing order, and aggregates them into one board. Every query runs to
//! completion before the next one starts.

use tracing::debug;

use crate::aggregate::aggregate;
use crate::cache::RouteCache;
use crate::clock::Clock;
use crate::config::FetchConfig;
use crate::domain::{ArrivalRecord, StopId};
use crate::error::Error;
use crate::fetcher::ArrivalFetcher;
use crate::mbta::TransitSource;
use crate::resolver::RouteResolver;

/// Arrival board lookup.
pub struct NextArrivals<'a, S, C, K> {
    source: &'a S,
    cache: &'a C,
    clock: &'a K,
    config: FetchConfig,
}

impl<'a, S, C, K> NextArrivals<'a, S, C, K>
where
    S: TransitSource,
    C: RouteCache,
    K: Clock,
{
    pub fn new(source: &'a S, cache: &'a C, clock: &'a K, config: FetchConfig) -> Self {
        Self {
            source,
            cache,
            clock,
            config,
        }
    }

    /// Upcoming arrivals at `stop` within the next two hours, soonest first.
    ///
    /// The first error from route resolution or from any route's fetch
    /// aborts the lookup. A route with no data simply contributes nothing.
    pub async fn next_arrivals(&self, stop: &StopId) -> Result<Vec<ArrivalRecord>, Error> {
        let routes = RouteResolver::new(self.source, self.cache)
            .resolve_routes(stop)
            .await?;

        let fetcher = ArrivalFetcher::new(self.source, self.clock, self.config);
        let mut records = Vec::new();

        for route in &routes {
            let arrivals = fetcher
                .fetch_arrivals(stop, &route.id, &route.direction_names)
                .await?;
            records.extend(arrivals);
        }

        let total = records.len();
        let board = aggregate(records);
        debug!(%stop, routes = routes.len(), total, shown = board.len(), "arrival board");

        Ok(board)
    }
}

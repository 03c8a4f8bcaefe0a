//! The remote data source seam.

use std::future::Future;

use serde_json::Value;

use crate::domain::{RouteId, SourceKind, StopId};
use crate::error::Error;

use super::types::ArrivalResource;

/// The three queries the arrival pipeline needs from a transit API.
///
/// Implemented by [`MbtaClient`](super::MbtaClient) for live data and by
/// [`MockSource`](super::MockSource) for tests and offline runs.
pub trait TransitSource {
    /// Routes serving `stop`, as the raw `data` array of the routes query.
    fn routes_for_stop(&self, stop: &StopId) -> impl Future<Output = Result<Vec<Value>, Error>>;

    /// Up to `limit` predictions or schedules for `route` at `stop`.
    fn arrivals(
        &self,
        kind: SourceKind,
        route: &RouteId,
        stop: &StopId,
        limit: u8,
    ) -> impl Future<Output = Result<Vec<ArrivalResource>, Error>>;
}

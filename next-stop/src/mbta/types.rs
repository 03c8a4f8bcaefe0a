//! MBTA v3 API response DTOs.
//!
//! The API speaks JSON:API: every response is an envelope with a top-level
//! `data` array of resources, each carrying an `id` and an `attributes`
//! object. We only model the attributes we read and ignore the rest.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{DataFormatError, Route, RouteId};

/// JSON:API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Matching resources. No matches is an empty array, not an error.
    pub data: Vec<T>,
}

/// A `route` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: RouteId,
    pub attributes: RouteAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteAttributes {
    /// Labels indexed by `direction_id`.
    pub direction_names: Vec<String>,
}

impl From<RouteResource> for Route {
    fn from(resource: RouteResource) -> Self {
        Route::new(resource.id, resource.attributes.direction_names)
    }
}

/// A `prediction` or `schedule` resource. Both share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalResource {
    pub attributes: ArrivalAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalAttributes {
    /// ISO-8601 with offset. Null at the first stop of a trip.
    #[serde(default)]
    pub arrival_time: Option<String>,

    /// ISO-8601 with offset. Null at the last stop of a trip.
    #[serde(default)]
    pub departure_time: Option<String>,

    /// Index into the route's `direction_names`.
    #[serde(default)]
    pub direction_id: Option<i64>,
}

impl ArrivalAttributes {
    /// The time the vehicle is at the stop: arrival, or departure for trips
    /// that originate here.
    pub fn stop_time(&self) -> Result<&str, DataFormatError> {
        self.arrival_time
            .as_deref()
            .or(self.departure_time.as_deref())
            .ok_or(DataFormatError::MissingField("arrival_time"))
    }

    pub fn direction_code(&self) -> Result<i64, DataFormatError> {
        self.direction_id
            .ok_or(DataFormatError::MissingField("direction_id"))
    }
}

/// Parse a raw `routes` data array into domain routes.
pub fn parse_routes(raw: &[Value]) -> Result<Vec<Route>, DataFormatError> {
    raw.iter()
        .map(|item| {
            RouteResource::deserialize(item)
                .map(Route::from)
                .map_err(|e| DataFormatError::json("route listing", e))
        })
        .collect()
}

/// Parse a raw arrival resource (prediction or schedule).
pub fn parse_arrival(raw: &Value) -> Result<ArrivalResource, DataFormatError> {
    ArrivalResource::deserialize(raw).map_err(|e| DataFormatError::json("arrival", e))
}

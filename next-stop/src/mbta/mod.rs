//! MBTA v3 API access.
//!
//! This module provides an HTTP client for the MBTA v3 JSON:API, the wire
//! DTOs it returns, and the [`TransitSource`] trait the arrival pipeline is
//! written against.
//!
//! Three queries are used:
//! - `routes?filter[stop]=..` for the routes serving a stop
//! - `predictions?filter[route]=..&filter[stop]=..` for real-time estimates
//! - `schedules?filter[route]=..&filter[stop]=..` for timetabled times

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, MbtaClient, MbtaConfig};
pub use error::TransportError;
pub use mock::MockSource;
pub use source::TransitSource;
pub use types::{
    ArrivalAttributes, ArrivalResource, Envelope, RouteAttributes, RouteResource, parse_arrival,
    parse_routes,
};

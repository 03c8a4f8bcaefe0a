//! Domain types for stop arrival boards.
//!
//! Everything in here is independent of the HTTP layer and the cache:
//! identifiers, routes, arrival records, and the time arithmetic used to
//! turn an API timestamp into "minutes from now".

mod arrival;
mod error;
mod ids;
mod route;
mod time;

pub use arrival::{ArrivalRecord, SourceKind};
pub use error::DataFormatError;
pub use ids::{RouteId, StopId};
pub use route::{Route, direction_name};
pub use time::{minutes_until, parse_local_timestamp};

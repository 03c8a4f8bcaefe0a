//! Routes serving a stop.

use super::error::DataFormatError;
use super::ids::RouteId;

/// A transit route and its direction labels.
///
/// `direction_names[i]` is the label for direction code `i` as reported in
/// predictions and schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub direction_names: Vec<String>,
}

impl Route {
    pub fn new(id: RouteId, direction_names: Vec<String>) -> Self {
        Self {
            id,
            direction_names,
        }
    }

    /// Look up the direction label for a direction code.
    ///
    /// A negative code or one past the end means the upstream payload is
    /// inconsistent with the route listing.
    pub fn direction(&self, code: i64) -> Result<&str, DataFormatError> {
        direction_name(&self.id, &self.direction_names, code)
    }
}

/// Resolve `code` against `direction_names` without needing a full `Route`.
pub fn direction_name<'a>(
    route: &RouteId,
    direction_names: &'a [String],
    code: i64,
) -> Result<&'a str, DataFormatError> {
    usize::try_from(code)
        .ok()
        .and_then(|idx| direction_names.get(idx))
        .map(String::as_str)
        .ok_or_else(|| DataFormatError::DirectionOutOfRange {
            route: route.to_string(),
            code,
            available: direction_names.len(),
        })
}

//! Normalized arrival records.

use std::fmt;

use super::ids::RouteId;

/// Which upstream feed an arrival came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Real-time estimate.
    Prediction,
    /// Static timetable entry.
    Scheduled,
}

impl SourceKind {
    /// Query order used by the fetcher.
    pub const ALL: [SourceKind; 2] = [SourceKind::Prediction, SourceKind::Scheduled];

    /// Name of the API resource backing this source.
    pub fn resource(self) -> &'static str {
        match self {
            SourceKind::Prediction => "predictions",
            SourceKind::Scheduled => "schedules",
        }
    }

    /// Single-letter tag used when printing arrivals.
    pub fn tag(self) -> char {
        match self {
            SourceKind::Prediction => 'P',
            SourceKind::Scheduled => 'S',
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

/// One upcoming arrival at the stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRecord {
    pub route: RouteId,
    pub direction: String,
    /// Rounded minutes from the fetch time; negative if already gone.
    pub minutes_until_arrival: i64,
    pub source_kind: SourceKind,
}

/// Formats as `"<route> <direction>, <minutes> min (<P|S>)"`.
impl fmt::Display for ArrivalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} min ({})",
            self.route,
            self.direction,
            self.minutes_until_arrival,
            self.source_kind.tag()
        )
    }
}

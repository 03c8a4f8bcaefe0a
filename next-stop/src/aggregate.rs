//! Merging arrivals into the final board.

use crate::domain::ArrivalRecord;

/// Open interval of minutes-from-now worth showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalWindow {
    /// Exclusive lower bound.
    pub after_mins: i64,
    /// Exclusive upper bound.
    pub before_mins: i64,
}

impl ArrivalWindow {
    /// Whether `minutes` lies strictly inside the window.
    pub fn contains(&self, minutes: i64) -> bool {
        self.after_mins < minutes && minutes < self.before_mins
    }

    /// Keep records inside the window, ordered soonest first.
    ///
    /// The sort is stable, so records with equal minutes keep their input
    /// order. Predictions and schedules for the same trip are both kept.
    pub fn apply(&self, records: Vec<ArrivalRecord>) -> Vec<ArrivalRecord> {
        let mut kept: Vec<ArrivalRecord> = records
            .into_iter()
            .filter(|r| self.contains(r.minutes_until_arrival))
            .collect();
        kept.sort_by_key(|r| r.minutes_until_arrival);
        kept
    }
}

/// Strictly future, under two hours.
impl Default for ArrivalWindow {
    fn default() -> Self {
        Self {
            after_mins: 0,
            before_mins: 120,
        }
    }
}

/// Filter to the default window and order by time.
pub fn aggregate(records: Vec<ArrivalRecord>) -> Vec<ArrivalRecord> {
    ArrivalWindow::default().apply(records)
}

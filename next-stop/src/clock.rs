//! Sources of "now" for arrival time arithmetic.

use chrono::{Local, NaiveDateTime};

/// Supplies the naive local time that arrival timestamps are measured against.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

//! Where "now" comes from.
use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock. Clones share the same instant, so a test can keep a
/// handle and move time while the engine owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(instant)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_handles_share_time() {
        let start = Utc.with_ymd_and_hms(2026, 2, 7, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        let handle = clock.clone();
        handle.advance(Duration::days(2));
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2026, 2, 9, 0, 0, 0).unwrap());
    }
}

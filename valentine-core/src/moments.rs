//! Countdown to the next meeting and time spent together.
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Together {
    pub days: i64,
    /// Thirty-day months.
    pub months: i64,
    /// Twelve thirty-day months.
    pub years: i64,
}

fn midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(0, 0, 0)?.and_local_timezone(offset).single()
}

/// Time left until midnight of `meeting` in `offset`; zero once it has passed.
#[must_use]
pub fn countdown_to(meeting: NaiveDate, offset: FixedOffset, now: DateTime<Utc>) -> Countdown {
    let Some(target) = midnight(meeting, offset) else {
        return Countdown::default();
    };
    let secs = target.signed_duration_since(now).num_seconds();
    if secs <= 0 {
        return Countdown::default();
    }
    Countdown {
        days: secs / SECS_PER_DAY,
        hours: (secs % SECS_PER_DAY) / SECS_PER_HOUR,
        minutes: (secs % SECS_PER_HOUR) / SECS_PER_MINUTE,
    }
}

/// Whole days since midnight of `start` in `offset`, folded into coarse
/// months and years.
#[must_use]
pub fn duration_since(start: NaiveDate, offset: FixedOffset, now: DateTime<Utc>) -> Together {
    let Some(start) = midnight(start, offset) else {
        return Together::default();
    };
    let days = now.signed_duration_since(start).num_days().max(0);
    let months = days / 30;
    Together {
        days,
        months,
        years: months / 12,
    }
}

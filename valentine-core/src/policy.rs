//! Calendar gate: decides from the clock alone whether a day has opened.
//!
//! All comparisons happen in one fixed offset so the boundary is the same
//! midnight for every viewer regardless of their locale.
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

use crate::config::{GiftConfig, OffSeasonPolicy};
use crate::days::DayEntry;

const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockPolicy {
    offset: FixedOffset,
    dev_mode: bool,
    off_season: OffSeasonPolicy,
    season_year: Option<i32>,
}

impl UnlockPolicy {
    #[must_use]
    pub fn new(offset: FixedOffset, dev_mode: bool) -> Self {
        Self {
            offset,
            dev_mode,
            off_season: OffSeasonPolicy::default(),
            season_year: None,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &GiftConfig) -> Self {
        Self {
            offset: cfg.offset(),
            dev_mode: cfg.dev_mode,
            off_season: cfg.off_season,
            season_year: cfg.season_year,
        }
    }

    #[must_use]
    pub const fn with_off_season(mut self, off_season: OffSeasonPolicy) -> Self {
        self.off_season = off_season;
        self
    }

    #[must_use]
    pub const fn with_season_year(mut self, year: Option<i32>) -> Self {
        self.season_year = year;
        self
    }

    #[must_use]
    pub fn local(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// Whether the calendar alone opens `entry` at `now`.
    ///
    /// Inside the day's month only the day of month counts. A season year
    /// replaces the `off_season` fallback for the other months.
    #[must_use]
    pub fn is_open(&self, entry: &DayEntry, now: DateTime<Utc>) -> bool {
        let local = self.local(now);
        if local.month() == entry.month {
            return local.day() >= entry.calendar_date;
        }
        if self.dev_mode {
            return true;
        }
        if let Some(year) = self.season_year {
            return NaiveDate::from_ymd_opt(year, entry.month, entry.calendar_date)
                .is_some_and(|opens| local.date_naive() >= opens);
        }
        match self.off_season {
            OffSeasonPolicy::DayOfMonth => local.day() >= entry.calendar_date,
            OffSeasonPolicy::Locked => false,
            OffSeasonPolicy::Open => true,
        }
    }

    /// Days left until `calendar_date` of `month` opens. Never negative.
    #[must_use]
    pub fn days_until(&self, month: u32, calendar_date: u32, now: DateTime<Utc>) -> u32 {
        let local = self.local(now);
        if local.month() == month {
            return calendar_date.saturating_sub(local.day());
        }
        if let Some(year) = self.season_year {
            let Some(opens) = NaiveDate::from_ymd_opt(year, month, calendar_date) else {
                return 0;
            };
            let days = opens.signed_duration_since(local.date_naive()).num_days();
            return clamp_days(days);
        }
        // The window is annual; outside it we count towards next year's.
        self.midnight(local.year() + 1, month, calendar_date)
            .map_or(0, |opens| ceil_days(opens.signed_duration_since(local).num_milliseconds()))
    }

    fn midnight(&self, year: i32, month: u32, day: u32) -> Option<DateTime<FixedOffset>> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(0, 0, 0)?
            .and_local_timezone(self.offset)
            .single()
    }
}

fn ceil_days(ms: i64) -> u32 {
    if ms <= 0 {
        return 0;
    }
    clamp_days((ms + MS_PER_DAY - 1) / MS_PER_DAY)
}

fn clamp_days(days: i64) -> u32 {
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

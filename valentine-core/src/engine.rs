//! The unlock engine: calendar gate ∪ manual overrides, plus visits and the
//! keepsake helpers, over one injected store and clock.
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::KeyValueStore;
use crate::achievements::Achievements;
use crate::clock::Clock;
use crate::config::GiftConfig;
use crate::days::{DAY_COUNT, DayEntry, DayRef, FEBRUARY, VALENTINE_DAYS};
use crate::moments::{Countdown, Together, countdown_to, duration_since};
use crate::policy::UnlockPolicy;
use crate::secrets::Secrets;
use crate::theme::TimeTheme;
use crate::unlock::{ChainAdvance, UnlockService};
use crate::visits::VisitTracker;

/// One card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
    pub color: &'static str,
    pub calendar_date: u32,
    pub unlocked: bool,
    pub visited: bool,
    pub days_until: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextUnlock {
    pub id: &'static str,
    pub name: &'static str,
    pub days_until: u32,
}

/// Everything the dashboard page renders, taken at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub days: Vec<DayStatus>,
    pub progress_percent: u8,
    pub visited_count: usize,
    pub next_unlock: Option<NextUnlock>,
    pub achievements: Achievements,
}

pub struct UnlockEngine<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    store: S,
    clock: C,
    config: GiftConfig,
    policy: UnlockPolicy,
}

impl<S, C> UnlockEngine<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, config: GiftConfig) -> Self {
        let policy = UnlockPolicy::from_config(&config);
        Self {
            store,
            clock,
            config,
            policy,
        }
    }

    pub fn with_default_config(store: S, clock: C) -> Self {
        Self::new(store, clock, GiftConfig::default())
    }

    pub const fn overrides(&self) -> UnlockService<'_, S> {
        UnlockService::new(&self.store)
    }

    pub const fn visits(&self) -> VisitTracker<'_, S> {
        VisitTracker::new(&self.store)
    }

    pub fn secrets(&self) -> Secrets<'_, S> {
        Secrets::new(
            &self.store,
            self.config.heart_clicks_for_memory_lane,
            &self.config.passphrase_sha256,
        )
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn gate(
        &self,
        entry: &DayEntry,
        overrides: &BTreeSet<&'static str>,
        now: DateTime<Utc>,
    ) -> bool {
        overrides.contains(entry.id) || self.policy.is_open(entry, now)
    }

    /// Whether a day is open now, by override or by calendar. Unknown days are
    /// closed.
    pub fn is_unlocked<'a>(&self, day: impl Into<DayRef<'a>>) -> bool {
        self.is_unlocked_at(day, self.now())
    }

    pub fn is_unlocked_at<'a>(&self, day: impl Into<DayRef<'a>>, now: DateTime<Utc>) -> bool {
        let Some(entry) = day.into().resolve() else {
            return false;
        };
        self.overrides().is_unlocked(entry.id) || self.policy.is_open(entry, now)
    }

    fn open_flags(&self, now: DateTime<Utc>) -> [bool; DAY_COUNT] {
        let overrides = self.overrides().all();
        VALENTINE_DAYS.each_ref().map(|entry| self.gate(entry, &overrides, now))
    }

    /// Open days in calendar order.
    pub fn unlocked_days(&self) -> Vec<&'static DayEntry> {
        let flags = self.open_flags(self.now());
        VALENTINE_DAYS
            .iter()
            .zip(flags)
            .filter_map(|(entry, open)| open.then_some(entry))
            .collect()
    }

    /// Closed days in calendar order.
    pub fn locked_days(&self) -> Vec<&'static DayEntry> {
        let flags = self.open_flags(self.now());
        VALENTINE_DAYS
            .iter()
            .zip(flags)
            .filter_map(|(entry, open)| (!open).then_some(entry))
            .collect()
    }

    pub fn next_day_to_unlock(&self) -> Option<&'static DayEntry> {
        self.locked_days().into_iter().next()
    }

    /// Days until the day with this day-of-month opens on the calendar.
    pub fn days_until_unlock(&self, calendar_date: u32) -> u32 {
        let month = DayRef::Date(calendar_date)
            .resolve()
            .map_or(FEBRUARY, |entry| entry.month);
        self.policy.days_until(month, calendar_date, self.now())
    }

    /// # Errors
    ///
    /// Returns the store's error if the override cannot be written.
    pub fn unlock(&self, id: &str) -> Result<bool, S::Error> {
        self.overrides().unlock(id)
    }

    /// # Errors
    ///
    /// Returns the store's error if the override cannot be written.
    pub fn lock(&self, id: &str) -> Result<bool, S::Error> {
        self.overrides().lock(id)
    }

    /// Open the day after `current` in the chain, whatever the calendar says.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the override cannot be written.
    pub fn unlock_next(&self, current: &str) -> Result<ChainAdvance, S::Error> {
        self.overrides().unlock_next(current)
    }

    pub fn unlock_order(&self) -> Vec<&'static str> {
        self.overrides().order()
    }

    /// Share of open days, rounded half up.
    pub fn progress_percent(&self) -> u8 {
        let open = self.open_flags(self.now()).iter().filter(|open| **open).count();
        percent(open, VALENTINE_DAYS.len())
    }

    /// # Errors
    ///
    /// Returns the store's error if the visit list cannot be written.
    pub fn mark_visited(&self, id: &str) -> Result<bool, S::Error> {
        self.visits().mark_visited(id)
    }

    pub fn visited_days(&self) -> Vec<&'static str> {
        self.visits().visited()
    }

    pub fn was_visited(&self, id: &str) -> bool {
        self.visits().was_visited(id)
    }

    pub fn achievements(&self) -> Achievements {
        self.visits().achievements()
    }

    pub fn dashboard(&self) -> Dashboard {
        let now = self.now();
        let flags = self.open_flags(now);
        let visited = self.visited_days();
        let days: Vec<DayStatus> = VALENTINE_DAYS
            .iter()
            .zip(flags)
            .map(|(entry, unlocked)| DayStatus {
                id: entry.id,
                name: entry.name,
                description: entry.description,
                icon: entry.icon,
                path: entry.path,
                color: entry.color,
                calendar_date: entry.calendar_date,
                unlocked,
                visited: visited.contains(&entry.id),
                days_until: self.policy.days_until(entry.month, entry.calendar_date, now),
            })
            .collect();
        let next_unlock = days.iter().find(|d| !d.unlocked).map(|d| NextUnlock {
            id: d.id,
            name: d.name,
            days_until: d.days_until,
        });
        let open = flags.iter().filter(|open| **open).count();
        Dashboard {
            progress_percent: percent(open, days.len()),
            visited_count: visited.len(),
            achievements: crate::achievements::earned(&visited),
            next_unlock,
            days,
        }
    }

    pub fn countdown_to_meeting(&self) -> Countdown {
        countdown_to(self.config.meeting_date, self.config.offset(), self.now())
    }

    pub fn relationship_duration(&self) -> Together {
        duration_since(self.config.relationship_start, self.config.offset(), self.now())
    }

    pub fn time_theme(&self) -> TimeTheme {
        TimeTheme::at(self.now(), self.config.offset())
    }

    pub fn is_night_mode(&self) -> bool {
        self.time_theme() == TimeTheme::Night
    }
}

fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    u8::try_from((part * 100 + total / 2) / total).unwrap_or(100)
}

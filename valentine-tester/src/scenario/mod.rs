use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Debug;
use std::path::PathBuf;
use valentine_core::{FixedClock, GiftConfig, MemoryStore, OffSeasonPolicy, UnlockEngine};

pub mod calendar;
pub mod journey;
pub mod keepsakes;
pub mod status;

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub config: GiftConfig,
    /// The instant "now"-relative scenarios are evaluated at.
    pub now: DateTime<Utc>,
    pub state_file: Option<PathBuf>,
    /// Seeds anything random, such as quote picks.
    pub seed: u64,
    pub verbose: bool,
}

/// Assertions collected by one scenario run.
#[derive(Debug, Default)]
pub struct Checks {
    run: usize,
    failures: Vec<String>,
}

impl Checks {
    pub fn check(&mut self, ok: bool, describe: impl FnOnce() -> String) {
        self.run += 1;
        if !ok {
            self.failures.push(describe());
        }
    }

    pub fn expect_eq<T: PartialEq + Debug>(&mut self, what: &str, actual: T, expected: T) {
        self.check(actual == expected, || {
            format!("{what}: expected {expected:?}, got {actual:?}")
        });
    }

    pub const fn run(&self) -> usize {
        self.run
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<String> {
        self.failures
    }
}

type ScenarioFn = fn(&ScenarioCtx, &mut Checks) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl Scenario {
    const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        run: ScenarioFn,
    ) -> Self {
        Self {
            key,
            name,
            description,
            run,
        }
    }

    /// Run every check. An `Err` means the scenario could not finish.
    pub fn execute(&self, ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
        (self.run)(ctx, checks)
    }
}

const SCENARIOS: [Scenario; 8] = [
    Scenario::new(
        "smoke",
        "Smoke",
        "Engine builds over an empty store and lists the whole week",
        journey::smoke,
    ),
    Scenario::new(
        "fresh-state",
        "Fresh State",
        "Derived views agree with each other at --now on an empty store",
        journey::fresh_state,
    ),
    Scenario::new(
        "chain-walk",
        "Chain Walk",
        "unlock_next walks the default order to the end",
        journey::chain_walk,
    ),
    Scenario::new(
        "visit-progress",
        "Visit Progress",
        "Progress and achievements grow with each unlock and visit",
        journey::visit_progress,
    ),
    Scenario::new(
        "calendar-sweep",
        "Calendar Sweep",
        "Hour-by-hour February sweep of the gate in the configured timezone",
        calendar::calendar_sweep,
    ),
    Scenario::new(
        "anchored-season",
        "Anchored Season",
        "A season year never relocks a day within that year; other Februaries use the day of month",
        calendar::anchored_season,
    ),
    Scenario::new(
        "dev-mode",
        "Dev Mode",
        "Dev mode opens the week outside February only",
        calendar::dev_mode,
    ),
    Scenario::new(
        "keepsakes",
        "Keepsakes",
        "Heart clicks, passphrase gate, countdown and theme",
        keepsakes::keepsakes,
    ),
];

const STATUS: Scenario = Scenario::new(
    "status",
    "Status",
    "Inspect the saved state (--state-file) at --now",
    status::status,
);

pub fn get_scenario(key: &str) -> Option<Scenario> {
    SCENARIOS
        .iter()
        .chain(std::iter::once(&STATUS))
        .find(|scenario| scenario.key == key)
        .copied()
}

/// Keys covered by `all`. `status` is left out because it reads real state.
pub fn standard_keys() -> impl Iterator<Item = &'static str> {
    SCENARIOS.iter().map(|scenario| scenario.key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .chain(std::iter::once(&STATUS))
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub type SimEngine = UnlockEngine<MemoryStore, FixedClock>;

/// Engine over a fresh memory store, paused at `now`.
pub fn sim_engine(config: GiftConfig, now: DateTime<Utc>) -> (SimEngine, FixedClock) {
    let clock = FixedClock::new(now);
    (UnlockEngine::new(MemoryStore::new(), clock.clone(), config), clock)
}

/// The user's config with the calendar reduced to the plain day-of-month rule.
pub fn plain_calendar(config: &GiftConfig) -> GiftConfig {
    GiftConfig {
        dev_mode: false,
        off_season: OffSeasonPolicy::DayOfMonth,
        season_year: None,
        ..config.clone()
    }
}

/// `y-m-d h:00` on the configured offset, as UTC.
pub fn local_instant(config: &GiftConfig, y: i32, m: u32, d: u32, h: u32) -> Result<DateTime<Utc>> {
    config
        .offset()
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("no local time {y}-{m:02}-{d:02} {h:02}:00"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_and_is_unique() {
        let keys: Vec<_> = list_scenarios().into_iter().map(|(key, _)| key).collect();
        for key in &keys {
            assert!(get_scenario(key).is_some(), "{key}");
        }
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), keys.len());
        assert!(!standard_keys().any(|key| key == "status"));
    }

    #[test]
    fn checks_record_only_failures() {
        let mut checks = Checks::default();
        checks.expect_eq("one", 1, 1);
        checks.expect_eq("two", 2, 3);
        checks.check(true, || unreachable!());
        assert_eq!(checks.run(), 3);
        assert_eq!(checks.failures(), ["two: expected 3, got 2"]);
    }

    #[test]
    fn local_instant_applies_the_offset() {
        let ist = GiftConfig::default();
        let utc = local_instant(&ist, 2026, 2, 7, 0).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 2, 6, 18, 30, 0).unwrap());
    }
}

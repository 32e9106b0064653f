use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use valentine_core::store::{UNLOCKS_KEY, VISITED_KEY};
use valentine_core::{
    ChainAdvance, Clock, DEFAULT_ORDER, FixedClock, GiftConfig, KeyValueStore, MemoryStore,
    UnlockEngine, VALENTINE_DAYS,
};

fn ist_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 6, 30, 0).unwrap()
}

fn build(
    store: &MemoryStore,
    now: DateTime<Utc>,
    config: GiftConfig,
) -> (UnlockEngine<MemoryStore, FixedClock>, FixedClock) {
    let clock = FixedClock::new(now);
    (UnlockEngine::new(store.clone(), clock.clone(), config), clock)
}

#[test]
fn default_order_covers_every_day_once() {
    let store = MemoryStore::new();
    let (engine, _) = build(&store, ist_noon(2026, 2, 1), GiftConfig::default());
    let order = engine.unlock_order();
    let unique: HashSet<_> = order.iter().copied().collect();
    assert_eq!(order.len(), VALENTINE_DAYS.len());
    assert_eq!(unique.len(), VALENTINE_DAYS.len());
    assert!(VALENTINE_DAYS.iter().all(|d| unique.contains(d.id)));
    assert_eq!(order, DEFAULT_ORDER);
}

#[test]
fn fresh_state_walkthrough() {
    let store = MemoryStore::new();
    // Before the week in non-dev mode: only the calendar decides, and it says no.
    let (engine, _) = build(&store, ist_noon(2026, 2, 3), GiftConfig::default());
    assert!(!engine.is_unlocked("rose"));
    assert_eq!(engine.progress_percent(), 0);

    engine.unlock("rose").unwrap();
    assert!(engine.is_unlocked("rose"));
    let before_visit = engine.progress_percent();
    assert_eq!(before_visit, 13);

    engine.mark_visited("rose").unwrap();
    assert!(engine.was_visited("rose"));

    assert_eq!(engine.unlock_next("rose").unwrap(), ChainAdvance::Unlocked("kiss"));
    assert!(engine.is_unlocked("kiss"));
    assert_eq!(engine.progress_percent(), 25);
}

#[test]
fn chain_end_returns_exhausted_without_writing() {
    let store = MemoryStore::new();
    let (engine, _) = build(&store, ist_noon(2026, 2, 3), GiftConfig::default());
    assert_eq!(engine.unlock_next("valentine").unwrap(), ChainAdvance::Exhausted);
    assert!(store.get(UNLOCKS_KEY).unwrap().is_none());
    assert!(engine.overrides().all().is_empty());
}

#[test]
fn four_of_eight_is_half_way() {
    let store = MemoryStore::new();
    let (engine, _) = build(&store, ist_noon(2026, 2, 3), GiftConfig::default());
    for id in ["rose", "hug", "kiss", "teddy"] {
        engine.unlock(id).unwrap();
    }
    assert_eq!(engine.unlocked_days().len(), 4);
    assert_eq!(engine.progress_percent(), 50);
}

#[test]
fn revisiting_keeps_one_entry() {
    let store = MemoryStore::new();
    let (engine, _) = build(&store, ist_noon(2026, 2, 14), GiftConfig::default());
    engine.mark_visited("promise").unwrap();
    engine.mark_visited("promise").unwrap();
    assert_eq!(engine.visited_days(), ["promise"]);
    assert_eq!(
        store.get(VISITED_KEY).unwrap().as_deref(),
        Some(r#"["promise"]"#)
    );
}

#[test]
fn chain_and_calendar_are_unioned() {
    let store = MemoryStore::new();
    let (engine, clock) = build(&store, ist_noon(2026, 2, 7), GiftConfig::default());
    engine.unlock_next("rose").unwrap();
    assert!(engine.is_unlocked("kiss"));
    clock.set(ist_noon(2026, 2, 13));
    // Both mechanisms now open kiss; locking the override leaves the calendar.
    assert!(engine.is_unlocked("kiss"));
    engine.lock("kiss").unwrap();
    assert!(engine.is_unlocked("kiss"));
}

#[test]
fn adding_overrides_never_closes_a_day() {
    let store = MemoryStore::new();
    let (engine, _) = build(&store, ist_noon(2026, 2, 9), GiftConfig::default());
    let open_flags = || -> Vec<bool> {
        VALENTINE_DAYS
            .iter()
            .map(|d| engine.is_unlocked(d.id))
            .collect()
    };
    let mut open_before = open_flags();
    for id in DEFAULT_ORDER {
        engine.unlock(id).unwrap();
        let open_now = open_flags();
        for (before, now) in open_before.iter().zip(&open_now) {
            assert!(!before || *now);
        }
        open_before = open_now;
    }
    assert!(open_before.iter().all(|open| *open));
}

#[test]
fn anchored_season_never_relocks_as_time_passes() {
    let store = MemoryStore::new();
    let config = GiftConfig::default().with_season_year(Some(2026));
    let (engine, clock) = build(&store, ist_noon(2026, 1, 25), config);
    let mut open_before = vec![false; VALENTINE_DAYS.len()];
    for _ in 0..120 {
        let open_now: Vec<bool> = VALENTINE_DAYS
            .iter()
            .map(|d| engine.is_unlocked(d.id))
            .collect();
        for (before, now) in open_before.iter().zip(&open_now) {
            assert!(!before || *now, "a day closed again at {}", clock.now());
        }
        open_before = open_now;
        clock.advance(Duration::days(1));
    }
    assert_eq!(engine.progress_percent(), 100);
}

#[test]
fn dev_mode_opens_the_week_out_of_season() {
    let store = MemoryStore::new();
    let config = GiftConfig::default().with_dev_mode(true);
    let (engine, _) = build(&store, ist_noon(2026, 10, 1), config);
    assert_eq!(engine.progress_percent(), 100);
    assert!(engine.next_day_to_unlock().is_none());
}

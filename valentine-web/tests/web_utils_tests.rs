use chrono::{TimeZone, Utc};
use valentine_core::{FixedClock, MemoryStore, OffSeasonPolicy, UnlockEngine, passphrase_digest};
use valentine_web::GIFT_CONFIG;
use valentine_web::bindings::day_ref_from;
use valentine_web::gift::GIFT_CONFIG_JSON;
use valentine_web::paths::day_url;

#[cfg(target_arch = "wasm32")]
use valentine_web::dom;

#[cfg(target_arch = "wasm32")]
#[test]
fn dom_helpers_find_the_window() {
    assert!(dom::window().is_some());
}

#[test]
fn embedded_gift_config_parses_and_anchors_the_season() {
    let parsed = valentine_core::GiftConfig::from_json(GIFT_CONFIG_JSON).expect("valid gift.json");
    assert_eq!(*GIFT_CONFIG, parsed);
    assert_eq!(GIFT_CONFIG.utc_offset_minutes, 330);
    assert_eq!(GIFT_CONFIG.season_year, Some(2026));
    assert_eq!(GIFT_CONFIG.off_season, OffSeasonPolicy::DayOfMonth);
    assert!(!GIFT_CONFIG.dev_mode);
    assert_eq!(GIFT_CONFIG.passphrase_sha256, passphrase_digest("samosa"));
}

#[test]
fn gift_engine_follows_the_indian_calendar() {
    // 20:00 UTC on the 9th is already 01:30 on the 10th in IST.
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 2, 9, 20, 0, 0).unwrap());
    let engine = UnlockEngine::new(MemoryStore::new(), clock.clone(), GIFT_CONFIG.clone());

    let open: Vec<_> = engine.unlocked_days().iter().map(|d| d.id).collect();
    assert_eq!(open, ["rose", "propose", "chocolate", "teddy"]);
    assert_eq!(engine.days_until_unlock(14), 4);

    // The rest of the season year stays open.
    clock.set(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
    assert_eq!(engine.unlocked_days().len(), 8);
    assert_eq!(engine.progress_percent(), 100);
}

#[test]
fn february_after_the_season_year_uses_the_day_of_month() {
    // Noon IST on Feb 3 2027.
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2027, 2, 3, 6, 30, 0).unwrap());
    let engine = UnlockEngine::new(MemoryStore::new(), clock.clone(), GIFT_CONFIG.clone());
    assert!(!engine.is_unlocked("rose"));
    assert_eq!(engine.days_until_unlock(7), 4);
    assert_eq!(engine.days_until_unlock(14), 11);
    assert_eq!(engine.progress_percent(), 0);

    clock.set(Utc.with_ymd_and_hms(2027, 2, 11, 6, 30, 0).unwrap());
    let open: Vec<_> = engine.unlocked_days().iter().map(|d| d.id).collect();
    assert_eq!(open, ["rose", "propose", "chocolate", "teddy", "promise"]);
    assert_eq!(engine.days_until_unlock(14), 3);
}

#[test]
fn js_arguments_resolve_to_days() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 2, 12, 6, 0, 0).unwrap());
    let engine = UnlockEngine::new(MemoryStore::new(), clock, GIFT_CONFIG.clone());

    let hug = day_ref_from(Some("hug"), None).expect("id");
    assert!(engine.is_unlocked(hug));
    let kiss_date = day_ref_from(None, Some(13.0)).expect("date");
    assert!(!engine.is_unlocked(kiss_date));
    assert!(day_ref_from(None, Some(13.25)).is_none());
}

#[test]
fn day_urls_point_at_day_pages() {
    assert_eq!(day_url("rose").as_deref(), Some("/days/rose-day"));
    assert!(day_url("diwali").is_none());
}

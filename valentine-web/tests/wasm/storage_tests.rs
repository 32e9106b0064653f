#![cfg(target_arch = "wasm32")]
use valentine_core::{ChainAdvance, KeyValueStore, UnlockEngine};
use valentine_web::clock::BrowserClock;
use valentine_web::dom;
use valentine_web::bindings;
use valentine_web::storage::BrowserStore;
use valentine_web::GIFT_CONFIG;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn clear_storage() {
    dom::local_storage().expect("localStorage").clear().expect("clear");
}

#[wasm_bindgen_test]
fn browser_store_round_trips_values() {
    clear_storage();
    let store = BrowserStore;
    assert_eq!(store.get("valentine_visited_days").expect("get"), None);
    store.set("valentine_visited_days", "[\"rose\"]").expect("set");
    assert_eq!(
        store.get("valentine_visited_days").expect("get").as_deref(),
        Some("[\"rose\"]")
    );
    store.remove("valentine_visited_days").expect("remove");
    assert_eq!(store.get("valentine_visited_days").expect("get"), None);
}

#[wasm_bindgen_test]
fn chain_progress_survives_a_new_engine() {
    clear_storage();
    let engine = UnlockEngine::new(BrowserStore, BrowserClock, GIFT_CONFIG.clone());
    assert_eq!(engine.unlock_next("rose").expect("unlock"), ChainAdvance::Unlocked("kiss"));
    engine.mark_visited("kiss").expect("visit");

    let reopened = UnlockEngine::new(BrowserStore, BrowserClock, GIFT_CONFIG.clone());
    assert!(reopened.is_unlocked("kiss"));
    assert_eq!(reopened.visited_days(), ["kiss"]);
    clear_storage();
}

#[wasm_bindgen_test]
fn unlock_next_day_reports_the_chain_to_js() {
    clear_storage();
    assert!(bindings::unlock_next_day("valentine").is_null());
    assert!(bindings::unlock_next_day("diwali").is_undefined());
    assert_eq!(bindings::unlock_next_day("rose").as_string().as_deref(), Some("kiss"));
    assert!(bindings::is_day_unlocked(&JsValue::from_str("kiss")));
    clear_storage();
}

#[wasm_bindgen_test]
fn garbage_in_storage_reads_as_fresh_state() {
    clear_storage();
    BrowserStore
        .set("valentine_day_unlocks_v1", "not json")
        .expect("set");
    let engine = UnlockEngine::new(BrowserStore, BrowserClock, GIFT_CONFIG.clone());
    assert_eq!(engine.unlock_order().first().copied(), Some("rose"));
    clear_storage();
}

#[wasm_bindgen_test]
fn browser_clock_is_after_the_epoch() {
    use valentine_core::Clock;
    assert!(BrowserClock.now().timestamp() > 0);
}

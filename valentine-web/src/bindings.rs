//! Functions the page components call. Names follow JavaScript conventions.
//!
//! Storage failures never reach the page: they are logged to the console and
//! the call behaves as if nothing changed.
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use valentine_core::{ChainAdvance, DayRef, VALENTINE_DAYS, random_quote};
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::gift::{WebEngine, create_web_unlock_engine};
use crate::paths;
use crate::storage::WebStorageError;

thread_local! {
    static ENGINE: WebEngine = create_web_unlock_engine();
}

fn with_engine<R>(f: impl FnOnce(&WebEngine) -> R) -> R {
    ENGINE.with(f)
}

fn or_logged<T: Default>(what: &str, result: Result<T, WebStorageError>) -> T {
    result.unwrap_or_else(|err| {
        dom::console_error(&format!("{what} failed: {err}"));
        T::default()
    })
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|err| {
        dom::console_error(&format!("serializing for JS failed: {err}"));
        JsValue::NULL
    })
}

/// Interpret a JS argument that is either a day id or a day of month.
#[must_use]
pub fn day_ref_from(text: Option<&str>, number: Option<f64>) -> Option<DayRef<'_>> {
    if let Some(id) = text {
        return Some(DayRef::Id(id));
    }
    let n = number?;
    if n.fract() != 0.0 || !(1.0..=31.0).contains(&n) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(DayRef::Date(n as u32))
}

#[wasm_bindgen(js_name = isDayUnlocked)]
pub fn is_day_unlocked(day_or_date: &JsValue) -> bool {
    let text = day_or_date.as_string();
    day_ref_from(text.as_deref(), day_or_date.as_f64())
        .is_some_and(|day| with_engine(|engine| engine.is_unlocked(day)))
}

#[wasm_bindgen(js_name = markDayVisited)]
pub fn mark_day_visited(id: &str) -> bool {
    with_engine(|engine| or_logged("markDayVisited", engine.mark_visited(id)))
}

/// The id that was unlocked, `null` at the end of the chain, or `undefined`
/// when `id` is not in the chain.
#[wasm_bindgen(js_name = unlockNextDay)]
pub fn unlock_next_day(id: &str) -> JsValue {
    match with_engine(|engine| engine.unlock_next(id)) {
        Ok(ChainAdvance::Unlocked(next)) => JsValue::from_str(next),
        Ok(ChainAdvance::Exhausted) => JsValue::NULL,
        Ok(ChainAdvance::NotInChain) => JsValue::UNDEFINED,
        Err(err) => {
            dom::console_error(&format!("unlockNextDay failed: {err}"));
            JsValue::UNDEFINED
        }
    }
}

#[wasm_bindgen(js_name = unlockDay)]
pub fn unlock_day(id: &str) -> bool {
    with_engine(|engine| or_logged("unlockDay", engine.unlock(id)))
}

#[wasm_bindgen(js_name = lockDay)]
pub fn lock_day(id: &str) -> bool {
    with_engine(|engine| or_logged("lockDay", engine.lock(id)))
}

#[wasm_bindgen(js_name = getDaysUntilUnlock)]
pub fn get_days_until_unlock(calendar_date: u32) -> u32 {
    with_engine(|engine| engine.days_until_unlock(calendar_date))
}

#[wasm_bindgen(js_name = getProgress)]
pub fn get_progress() -> u8 {
    with_engine(WebEngine::progress_percent)
}

#[wasm_bindgen(js_name = getValentineDays)]
pub fn get_valentine_days() -> JsValue {
    to_js(&VALENTINE_DAYS)
}

#[wasm_bindgen(js_name = getUnlockedDays)]
pub fn get_unlocked_days() -> JsValue {
    with_engine(|engine| to_js(&engine.unlocked_days()))
}

#[wasm_bindgen(js_name = getLockedDays)]
pub fn get_locked_days() -> JsValue {
    with_engine(|engine| to_js(&engine.locked_days()))
}

#[wasm_bindgen(js_name = getNextDayToUnlock)]
pub fn get_next_day_to_unlock() -> JsValue {
    with_engine(|engine| to_js(&engine.next_day_to_unlock()))
}

#[wasm_bindgen(js_name = getUnlockOrder)]
pub fn get_unlock_order() -> JsValue {
    with_engine(|engine| to_js(&engine.unlock_order()))
}

#[wasm_bindgen(js_name = getVisitedDays)]
pub fn get_visited_days() -> JsValue {
    with_engine(|engine| to_js(&engine.visited_days()))
}

#[wasm_bindgen(js_name = wasDayVisited)]
pub fn was_day_visited(id: &str) -> bool {
    with_engine(|engine| engine.was_visited(id))
}

#[wasm_bindgen(js_name = getAchievements)]
pub fn get_achievements() -> JsValue {
    with_engine(|engine| to_js(&engine.achievements()))
}

#[wasm_bindgen(js_name = getDashboard)]
pub fn get_dashboard() -> JsValue {
    with_engine(|engine| to_js(&engine.dashboard()))
}

#[wasm_bindgen(js_name = dayUrl)]
pub fn day_url(id: &str) -> Option<String> {
    paths::day_url(id)
}

#[wasm_bindgen(js_name = incrementHeartClicks)]
pub fn increment_heart_clicks() -> u32 {
    with_engine(|engine| or_logged("incrementHeartClicks", engine.secrets().increment_heart_clicks()))
}

#[wasm_bindgen(js_name = checkHeartEasterEgg)]
pub fn check_heart_easter_egg() -> bool {
    with_engine(|engine| or_logged("checkHeartEasterEgg", engine.secrets().check_heart_easter_egg()))
}

#[wasm_bindgen(js_name = isMemoryLaneUnlocked)]
pub fn is_memory_lane_unlocked() -> bool {
    with_engine(|engine| engine.secrets().is_memory_lane_unlocked())
}

#[wasm_bindgen(js_name = verifyPassphrase)]
pub fn verify_passphrase(input: &str) -> bool {
    with_engine(|engine| or_logged("verifyPassphrase", engine.secrets().verify_passphrase(input)))
}

#[wasm_bindgen(js_name = hasAccess)]
pub fn has_access() -> bool {
    with_engine(|engine| engine.secrets().has_access())
}

#[wasm_bindgen(js_name = getCountdownToMeeting)]
pub fn get_countdown_to_meeting() -> JsValue {
    with_engine(|engine| to_js(&engine.countdown_to_meeting()))
}

#[wasm_bindgen(js_name = getRelationshipDuration)]
pub fn get_relationship_duration() -> JsValue {
    with_engine(|engine| to_js(&engine.relationship_duration()))
}

#[wasm_bindgen(js_name = getRandomLoveQuote)]
pub fn get_random_love_quote() -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    random_quote(&mut SmallRng::seed_from_u64(seed)).to_string()
}

#[wasm_bindgen(js_name = getTimeBasedTheme)]
pub fn get_time_based_theme() -> String {
    with_engine(|engine| engine.time_theme().to_string())
}

#[wasm_bindgen(js_name = isNightMode)]
pub fn is_night_mode() -> bool {
    with_engine(WebEngine::is_night_mode)
}

#[cfg(test)]
mod tests {
    use super::day_ref_from;
    use valentine_core::DayRef;

    #[test]
    fn strings_are_ids_and_whole_numbers_are_dates() {
        assert_eq!(day_ref_from(Some("rose"), None), Some(DayRef::Id("rose")));
        assert_eq!(day_ref_from(None, Some(12.0)), Some(DayRef::Date(12)));
    }

    #[test]
    fn junk_numbers_resolve_to_nothing() {
        assert_eq!(day_ref_from(None, Some(12.5)), None);
        assert_eq!(day_ref_from(None, Some(-3.0)), None);
        assert_eq!(day_ref_from(None, Some(f64::NAN)), None);
        assert_eq!(day_ref_from(None, None), None);
    }
}

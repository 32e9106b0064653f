use chrono::{DateTime, Utc};
use valentine_core::Clock;

/// Reads `Date.now()`; `Utc::now()` has no time source on `wasm32-unknown-unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        #[allow(clippy::cast_possible_truncation)]
        let millis = js_sys::Date::now() as i64;
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

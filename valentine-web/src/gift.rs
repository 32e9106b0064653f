//! Web-specific engine wiring
//!
//! Provides the embedded gift configuration and builds the engine over
//! `localStorage` and the browser clock.

use once_cell::sync::Lazy;
use valentine_core::{GiftConfig, UnlockEngine};

use crate::clock::BrowserClock;
use crate::storage::BrowserStore;

pub const GIFT_CONFIG_JSON: &str = include_str!("../static/gift.json");

/// Parsed once; a broken embedded file falls back to the built-in defaults.
pub static GIFT_CONFIG: Lazy<GiftConfig> = Lazy::new(|| {
    GiftConfig::from_json(GIFT_CONFIG_JSON).unwrap_or_else(|err| {
        log::error!("embedded gift config is invalid, using defaults: {err}");
        GiftConfig::default()
    })
});

pub type WebEngine = UnlockEngine<BrowserStore, BrowserClock>;

/// Create an engine backed by `localStorage` and `Date.now()`
#[must_use]
pub fn create_web_unlock_engine() -> WebEngine {
    UnlockEngine::new(BrowserStore, BrowserClock, GIFT_CONFIG.clone())
}

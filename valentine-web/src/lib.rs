#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod clock;
pub mod dom;
pub mod gift;
pub mod paths;
pub mod storage;

pub use gift::{GIFT_CONFIG, WebEngine, create_web_unlock_engine};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    log::debug!("valentine engine loaded, season anchored to {:?}", GIFT_CONFIG.season_year);
}

//! `localStorage` as the engine's key/value store.
use valentine_core::KeyValueStore;
use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Js(String),
}

fn js_err(value: &JsValue) -> WebStorageError {
    WebStorageError::Js(dom::js_error_message(value))
}

/// Looks `localStorage` up on every call, so a store created before the page
/// finished loading still works.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Result<web_sys::Storage, WebStorageError> {
        dom::local_storage().map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))
    }
}

impl KeyValueStore for BrowserStore {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::storage()?.get_item(key).map_err(|e| js_err(&e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::storage()?.set_item(key, value).map_err(|e| js_err(&e))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        Self::storage()?.remove_item(key).map_err(|e| js_err(&e))
    }
}

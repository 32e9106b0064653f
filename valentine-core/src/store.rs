//! Persisted record keys and the JSON plumbing shared by every service.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::KeyValueStore;

pub const UNLOCKS_KEY: &str = "valentine_day_unlocks_v1";
pub const VISITED_KEY: &str = "valentine_visited_days";
pub const HEART_CLICKS_KEY: &str = "valentine_heart_clicks";
pub const MEMORY_LANE_KEY: &str = "valentine_memory_lane_unlocked";
pub const ACCESS_KEY: &str = "valentine_password_correct";

/// Read `key` as JSON. Missing, unreadable and corrupt records all come back
/// as `None`.
pub fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("reading {key} failed, treating as absent: {err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{key} holds corrupt JSON, treating as absent: {err}");
            None
        }
    }
}

/// # Errors
///
/// Returns the store's error if the write fails.
pub fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), S::Error>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    // Plain maps, lists and strings cannot fail to serialize.
    let raw = serde_json::to_string(value).unwrap_or_default();
    store.set(key, &raw)
}

/// Read a plain string flag, swallowing read errors like [`read_json`].
pub fn read_raw<S>(store: &S, key: &str) -> Option<String>
where
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)
        .map_err(|err| log::warn!("reading {key} failed, treating as absent: {err}"))
        .ok()
        .flatten()
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from `(key, value)` pairs.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct Broken;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        type Error = Broken;

        fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(Broken)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(Broken)
        }

        fn remove(&self, _key: &str) -> Result<(), Self::Error> {
            Err(Broken)
        }
    }

    #[test]
    fn corrupt_and_failing_reads_are_absent() {
        let store = MemoryStore::with_entries([(VISITED_KEY, "[\"rose\"")]);
        assert_eq!(read_json::<_, Vec<String>>(&store, VISITED_KEY), None);
        assert_eq!(read_json::<_, Vec<String>>(&BrokenStore, VISITED_KEY), None);
        assert_eq!(read_raw(&BrokenStore, ACCESS_KEY), None);
    }

    #[test]
    fn json_round_trips_through_memory_store() {
        let store = MemoryStore::new();
        write_json(&store, VISITED_KEY, &["rose", "kiss"]).unwrap();
        assert_eq!(
            store.snapshot().get(VISITED_KEY).map(String::as_str),
            Some(r#"["rose","kiss"]"#)
        );
        let back: Vec<String> = read_json(&store, VISITED_KEY).unwrap();
        assert_eq!(back, ["rose", "kiss"]);
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.set(ACCESS_KEY, "true").unwrap();
        assert_eq!(read_raw(&store, ACCESS_KEY).as_deref(), Some("true"));
        store.remove(ACCESS_KEY).unwrap();
        assert!(other.is_empty());
    }
}

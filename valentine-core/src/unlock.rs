//! Manual override store and the sequential unlock chain.
//!
//! Both live in one persisted record: the set of explicitly opened days and
//! the order in which finishing a day opens the next one.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::KeyValueStore;
use crate::days::{DEFAULT_ORDER, VALENTINE_DAYS, canonical_id, is_known_day};
use crate::store::{UNLOCKS_KEY, read_json, write_json};

/// Persisted shape: `{ "unlocked": { "rose": true }, "order": ["rose", ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRecord {
    #[serde(default)]
    pub unlocked: BTreeMap<String, bool>,
    #[serde(default = "default_order")]
    pub order: Vec<String>,
}

fn default_order() -> Vec<String> {
    DEFAULT_ORDER.iter().map(ToString::to_string).collect()
}

impl Default for UnlockRecord {
    fn default() -> Self {
        Self {
            unlocked: BTreeMap::new(),
            order: default_order(),
        }
    }
}

impl UnlockRecord {
    /// Drop unknown or falsy overrides and replace an order that is not a
    /// permutation of the catalog.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.unlocked.retain(|id, on| *on && is_known_day(id));
        if !is_permutation(&self.order) {
            log::warn!("persisted unlock order {:?} is invalid, using default", self.order);
            self.order = default_order();
        }
        self
    }
}

fn is_permutation(order: &[String]) -> bool {
    let unique: HashSet<&str> = order.iter().map(String::as_str).collect();
    order.len() == VALENTINE_DAYS.len()
        && unique.len() == order.len()
        && unique.iter().all(|id| is_known_day(id))
}

/// Outcome of advancing the chain past a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAdvance {
    /// The day is not part of the chain; nothing changed.
    NotInChain,
    /// The day is last in the chain; nothing changed.
    Exhausted,
    /// The successor is now unlocked.
    Unlocked(&'static str),
}

impl ChainAdvance {
    #[must_use]
    pub const fn unlocked(self) -> Option<&'static str> {
        match self {
            Self::Unlocked(id) => Some(id),
            Self::NotInChain | Self::Exhausted => None,
        }
    }
}

/// Read-modify-write view over the unlock record. Concurrent writers are not
/// coordinated; the last write wins.
pub struct UnlockService<'s, S: KeyValueStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> UnlockService<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Current record, defaulted when absent or unreadable.
    #[must_use]
    pub fn load(&self) -> UnlockRecord {
        read_json::<_, UnlockRecord>(self.store, UNLOCKS_KEY)
            .unwrap_or_default()
            .sanitized()
    }

    fn save(&self, record: &UnlockRecord) -> Result<(), S::Error> {
        write_json(self.store, UNLOCKS_KEY, record)
    }

    #[must_use]
    pub fn order(&self) -> Vec<&'static str> {
        self.load()
            .order
            .iter()
            .filter_map(|id| canonical_id(id))
            .collect()
    }

    #[must_use]
    pub fn all(&self) -> BTreeSet<&'static str> {
        self.load()
            .unlocked
            .keys()
            .filter_map(|id| canonical_id(id))
            .collect()
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.load().unlocked.get(id).copied().unwrap_or(false)
    }

    /// Mark `id` unlocked. Returns whether anything changed; unknown ids are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record cannot be written.
    pub fn unlock(&self, id: &str) -> Result<bool, S::Error> {
        let Some(id) = canonical_id(id) else {
            return Ok(false);
        };
        let mut record = self.load();
        if record.unlocked.insert(id.to_string(), true) == Some(true) {
            return Ok(false);
        }
        self.save(&record)?;
        log::debug!("unlocked {id}");
        Ok(true)
    }

    /// Remove the override for `id`. The calendar may still open it.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record cannot be written.
    pub fn lock(&self, id: &str) -> Result<bool, S::Error> {
        let mut record = self.load();
        if record.unlocked.remove(id).is_none() {
            return Ok(false);
        }
        self.save(&record)?;
        log::debug!("locked {id}");
        Ok(true)
    }

    /// Unlock whatever follows `current` in the chain.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record cannot be written.
    pub fn unlock_next(&self, current: &str) -> Result<ChainAdvance, S::Error> {
        let mut record = self.load();
        let Some(idx) = record.order.iter().position(|id| id == current) else {
            return Ok(ChainAdvance::NotInChain);
        };
        let Some(next) = record.order.get(idx + 1).and_then(|id| canonical_id(id)) else {
            return Ok(ChainAdvance::Exhausted);
        };
        record.unlocked.insert(next.to_string(), true);
        self.save(&record)?;
        log::debug!("chain advanced {current} -> {next}");
        Ok(ChainAdvance::Unlocked(next))
    }
}

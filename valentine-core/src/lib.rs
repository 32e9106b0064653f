//! Valentine Week Unlock Engine
//!
//! Platform-agnostic logic behind the gift site: which of the eight days are
//! open, what has been visited, and the badges and keepsakes derived from
//! that. Persistence and time are injected so the same engine runs against
//! browser `localStorage`, a JSON file, or memory in tests.

pub mod achievements;
pub mod clock;
pub mod config;
pub mod days;
pub mod engine;
pub mod moments;
pub mod policy;
pub mod quotes;
pub mod secrets;
pub mod store;
pub mod theme;
pub mod unlock;
pub mod visits;

// Re-export commonly used types
pub use achievements::{ALL_ACHIEVEMENTS, Achievement, Achievements, earned};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, GiftConfig, OffSeasonPolicy};
pub use days::{DEFAULT_ORDER, DayEntry, DayRef, VALENTINE_DAYS, find_day};
pub use engine::{Dashboard, DayStatus, NextUnlock, UnlockEngine};
pub use moments::{Countdown, Together};
pub use policy::UnlockPolicy;
pub use quotes::{LOVE_QUOTES, random_quote};
pub use secrets::{Secrets, passphrase_digest};
pub use store::MemoryStore;
pub use theme::TimeTheme;
pub use unlock::{ChainAdvance, UnlockRecord, UnlockService};
pub use visits::VisitTracker;

/// String key/value persistence the engine reads and writes through.
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key` if present
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}

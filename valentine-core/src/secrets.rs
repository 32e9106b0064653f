//! The passphrase gate in front of the dashboard and the heart-click easter egg.
use sha2::{Digest, Sha256};

use crate::KeyValueStore;
use crate::store::{ACCESS_KEY, HEART_CLICKS_KEY, MEMORY_LANE_KEY, read_raw};

const FLAG_ON: &str = "true";

/// Lower-case hex SHA-256 of the normalised passphrase.
#[must_use]
pub fn passphrase_digest(input: &str) -> String {
    Sha256::digest(input.trim().to_lowercase().as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub struct Secrets<'s, S: KeyValueStore + ?Sized> {
    store: &'s S,
    heart_threshold: u32,
    passphrase_sha256: &'s str,
}

impl<'s, S: KeyValueStore + ?Sized> Secrets<'s, S> {
    pub const fn new(store: &'s S, heart_threshold: u32, passphrase_sha256: &'s str) -> Self {
        Self {
            store,
            heart_threshold,
            passphrase_sha256,
        }
    }

    /// Stored click count; anything unparsable counts as zero.
    #[must_use]
    pub fn heart_clicks(&self) -> u32 {
        read_raw(self.store, HEART_CLICKS_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    /// # Errors
    ///
    /// Returns the store's error if the new count cannot be written.
    pub fn increment_heart_clicks(&self) -> Result<u32, S::Error> {
        let count = self.heart_clicks().saturating_add(1);
        self.store.set(HEART_CLICKS_KEY, &count.to_string())?;
        Ok(count)
    }

    /// Opens Memory Lane once enough hearts were clicked.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the flag cannot be written.
    pub fn check_heart_easter_egg(&self) -> Result<bool, S::Error> {
        if self.heart_clicks() < self.heart_threshold {
            return Ok(false);
        }
        if !self.is_memory_lane_unlocked() {
            self.store.set(MEMORY_LANE_KEY, FLAG_ON)?;
            log::debug!("memory lane unlocked");
        }
        Ok(true)
    }

    #[must_use]
    pub fn is_memory_lane_unlocked(&self) -> bool {
        read_raw(self.store, MEMORY_LANE_KEY).as_deref() == Some(FLAG_ON)
    }

    /// Check `input` against the configured digest, remembering a match.
    /// Case and surrounding whitespace are ignored, so `" Samosa "` matches.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the access flag cannot be written.
    pub fn verify_passphrase(&self, input: &str) -> Result<bool, S::Error> {
        if !passphrase_digest(input).eq_ignore_ascii_case(self.passphrase_sha256) {
            log::debug!("passphrase rejected");
            return Ok(false);
        }
        self.store.set(ACCESS_KEY, FLAG_ON)?;
        Ok(true)
    }

    #[must_use]
    pub fn has_access(&self) -> bool {
        read_raw(self.store, ACCESS_KEY).as_deref() == Some(FLAG_ON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PASSPHRASE_SHA256;
    use crate::store::MemoryStore;

    #[test]
    fn digest_ignores_case_and_padding() {
        assert_eq!(passphrase_digest(" Samosa\n"), DEFAULT_PASSPHRASE_SHA256);
        assert_ne!(passphrase_digest("pakora"), DEFAULT_PASSPHRASE_SHA256);
    }

    #[test]
    fn memory_lane_opens_on_fifth_click() {
        let store = MemoryStore::new();
        let secrets = Secrets::new(&store, 5, DEFAULT_PASSPHRASE_SHA256);
        for expected in 1..=4 {
            assert_eq!(secrets.increment_heart_clicks().unwrap(), expected);
            assert!(!secrets.check_heart_easter_egg().unwrap());
        }
        assert!(!secrets.is_memory_lane_unlocked());
        assert_eq!(secrets.increment_heart_clicks().unwrap(), 5);
        assert!(secrets.check_heart_easter_egg().unwrap());
        assert!(secrets.is_memory_lane_unlocked());
    }

    #[test]
    fn garbage_click_count_restarts_from_zero() {
        let store = MemoryStore::with_entries([(HEART_CLICKS_KEY, "lots")]);
        let secrets = Secrets::new(&store, 5, DEFAULT_PASSPHRASE_SHA256);
        assert_eq!(secrets.heart_clicks(), 0);
        assert_eq!(secrets.increment_heart_clicks().unwrap(), 1);
    }

    #[test]
    fn passphrase_gate_remembers_success_only() {
        let store = MemoryStore::new();
        let secrets = Secrets::new(&store, 5, DEFAULT_PASSPHRASE_SHA256);
        assert!(!secrets.verify_passphrase("biryani").unwrap());
        assert!(!secrets.has_access());
        assert!(secrets.verify_passphrase("SAMOSA").unwrap());
        assert!(secrets.has_access());
    }

    #[test]
    fn passphrase_ignores_case_and_surrounding_whitespace() {
        let store = MemoryStore::new();
        let secrets = Secrets::new(&store, 5, DEFAULT_PASSPHRASE_SHA256);
        assert!(!secrets.verify_passphrase("sam osa").unwrap());
        assert!(secrets.verify_passphrase("  Samosa\n").unwrap());
        assert_eq!(passphrase_digest(" samosa "), passphrase_digest("SAMOSA"));
    }
}

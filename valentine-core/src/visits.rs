//! Which days the recipient has actually opened.
use crate::KeyValueStore;
use crate::achievements::{Achievements, earned};
use crate::days::canonical_id;
use crate::store::{VISITED_KEY, read_json, write_json};

pub struct VisitTracker<'s, S: KeyValueStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: KeyValueStore + ?Sized> VisitTracker<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Visited day ids in first-visit order, without duplicates or unknown ids.
    #[must_use]
    pub fn visited(&self) -> Vec<&'static str> {
        let raw: Vec<String> = read_json(self.store, VISITED_KEY).unwrap_or_default();
        let mut visited: Vec<&'static str> = Vec::with_capacity(raw.len());
        for id in raw.iter().filter_map(|id| canonical_id(id)) {
            if !visited.contains(&id) {
                visited.push(id);
            }
        }
        visited
    }

    #[must_use]
    pub fn was_visited(&self, id: &str) -> bool {
        self.visited().contains(&id)
    }

    /// Append `id` if it is a known day not yet visited. Returns whether the
    /// list grew.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the list cannot be written.
    pub fn mark_visited(&self, id: &str) -> Result<bool, S::Error> {
        let Some(id) = canonical_id(id) else {
            return Ok(false);
        };
        let mut visited = self.visited();
        if visited.contains(&id) {
            return Ok(false);
        }
        visited.push(id);
        write_json(self.store, VISITED_KEY, &visited)?;
        log::debug!("visited {id} ({} total)", visited.len());
        Ok(true)
    }

    #[must_use]
    pub fn achievements(&self) -> Achievements {
        earned(&self.visited())
    }
}

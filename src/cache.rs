//! In-memory episode cache
//!
//! Maps a show id to the episode list fetched for it. Entries live for the
//! whole process: nothing is evicted or invalidated.

use std::collections::HashMap;

use crate::models::{Episode, ShowId};

/// Process-lifetime cache of episode lists keyed by show
#[derive(Debug, Default, Clone)]
pub struct EpisodeCache {
    entries: HashMap<ShowId, Vec<Episode>>,
}

impl EpisodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached episodes for a show, if any. Never fetches.
    pub fn get(&self, show_id: ShowId) -> Option<&[Episode]> {
        self.entries.get(&show_id).map(Vec::as_slice)
    }

    /// Store the episode list for a show.
    ///
    /// Overwriting is allowed; fetches are only issued on a miss so it does
    /// not happen in normal operation.
    pub fn put(&mut self, show_id: ShowId, episodes: Vec<Episode>) {
        if self.entries.insert(show_id, episodes).is_some() {
            tracing::debug!(show_id, "episode cache entry replaced");
        }
    }

    pub fn contains(&self, show_id: ShowId) -> bool {
        self.entries.contains_key(&show_id)
    }

    /// Number of shows with cached episodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

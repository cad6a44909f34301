//! View state
//!
//! Holds the authoritative snapshot the screens render from: the sorted show
//! list, the current show, its episodes, the search terms and the jump
//! target. Every visible subset is derived from that state on demand.

use serde::Serialize;
use thiserror::Error;

use crate::models::{Episode, EpisodeId, JumpTarget, Show, ShowId};

/// View lookups that can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Episode not found: {0}")]
    EpisodeNotFound(EpisodeId),
}

/// Sort shows by name, ignoring case. Equal names keep their input order.
pub fn sort_shows_by_name(shows: &mut [Show]) {
    shows.sort_by_cached_key(|s| s.name.to_lowercase());
}

/// Pick the show to open first: the preferred id when present, else the
/// first show in the given order.
pub fn pick_default_show(shows: &[Show], preferred: ShowId) -> Option<ShowId> {
    shows
        .iter()
        .find(|s| s.id == preferred)
        .or_else(|| shows.first())
        .map(|s| s.id)
}

/// Lowercased, trimmed search needle
fn needle(term: &str) -> String {
    term.trim().to_lowercase()
}

// =============================================================================
// View State
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    shows: Vec<Show>,
    show_search: String,
    current_show: Option<ShowId>,
    episodes: Vec<Episode>,
    episode_search: String,
    jump: JumpTarget,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Shows
    // -------------------------------------------------------------------------

    /// Replace the show list (sorted by name) and clear the show search
    pub fn set_shows(&mut self, mut shows: Vec<Show>) {
        sort_shows_by_name(&mut shows);
        self.shows = shows;
        self.show_search.clear();
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn show(&self, show_id: ShowId) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == show_id)
    }

    /// Shows matching `term` over name, summary and genres, in name order
    pub fn filter_shows_by(&self, term: &str) -> Vec<&Show> {
        let needle = needle(term);
        self.shows.iter().filter(|s| s.matches(&needle)).collect()
    }

    pub fn show_search(&self) -> &str {
        &self.show_search
    }

    pub fn set_show_search(&mut self, term: impl Into<String>) {
        self.show_search = term.into();
    }

    /// Shows matching the stored show search
    pub fn visible_shows(&self) -> Vec<&Show> {
        self.filter_shows_by(&self.show_search)
    }

    // -------------------------------------------------------------------------
    // Current show
    // -------------------------------------------------------------------------

    /// Record the current show. Late fetch responses are checked against it.
    pub fn select_show(&mut self, show_id: ShowId) {
        self.current_show = Some(show_id);
    }

    pub fn current_show(&self) -> Option<ShowId> {
        self.current_show
    }

    /// Show record for the current selection, when it is in the list
    pub fn current_show_record(&self) -> Option<&Show> {
        self.current_show.and_then(|id| self.show(id))
    }

    // -------------------------------------------------------------------------
    // Episodes
    // -------------------------------------------------------------------------

    /// Replace the episode list; resets the search term and jump target
    pub fn set_episodes(&mut self, episodes: Vec<Episode>) {
        self.episodes = episodes;
        self.episode_search.clear();
        self.jump = JumpTarget::All;
    }

    /// Drop the episode list while a new one loads
    pub fn clear_episodes(&mut self) {
        self.set_episodes(Vec::new());
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Episodes matching `term` over name and summary, in fetched order
    pub fn filter_episodes_by(&self, term: &str) -> Vec<&Episode> {
        let needle = needle(term);
        self.episodes.iter().filter(|e| e.matches(&needle)).collect()
    }

    pub fn episode_search(&self) -> &str {
        &self.episode_search
    }

    /// Store the episode search term. Typing resets the jump target to all.
    pub fn set_episode_search(&mut self, term: impl Into<String>) {
        self.episode_search = term.into();
        self.jump = JumpTarget::All;
    }

    pub fn jump_target(&self) -> JumpTarget {
        self.jump
    }

    /// Jump to all episodes or one episode.
    ///
    /// On success the jump target is recorded and the search term cleared.
    /// An unknown id leaves the state untouched.
    pub fn select_episode(&mut self, target: JumpTarget) -> Result<Vec<&Episode>, ViewError> {
        if let JumpTarget::Episode(id) = target {
            if !self.episodes.iter().any(|e| e.id == id) {
                return Err(ViewError::EpisodeNotFound(id));
            }
        }

        self.jump = target;
        self.episode_search.clear();
        Ok(self.visible_episodes())
    }

    /// Episodes currently visible: the jumped-to episode, or the search result
    pub fn visible_episodes(&self) -> Vec<&Episode> {
        match self.jump {
            JumpTarget::All => self.filter_episodes_by(&self.episode_search),
            JumpTarget::Episode(id) => self.episodes.iter().filter(|e| e.id == id).collect(),
        }
    }

    /// Describe what is visible right now
    pub fn visible(&self) -> VisibleView<'_> {
        VisibleView {
            shows: self.visible_shows(),
            total_shows: self.shows.len(),
            current_show: self.current_show_record(),
            episodes: self.visible_episodes(),
            total_episodes: self.episodes.len(),
            jump: self.jump,
        }
    }
}

// =============================================================================
// Visible View
// =============================================================================

/// What the screens should draw, derived from [`ViewState`]
#[derive(Debug, Clone, Serialize)]
pub struct VisibleView<'a> {
    pub shows: Vec<&'a Show>,
    pub total_shows: usize,
    pub current_show: Option<&'a Show>,
    pub episodes: Vec<&'a Episode>,
    pub total_episodes: usize,
    pub jump: JumpTarget,
}

impl VisibleView<'_> {
    /// `Showing X / Y episodes`
    pub fn episode_status(&self) -> String {
        format!(
            "Showing {} / {} episodes",
            self.episodes.len(),
            self.total_episodes
        )
    }

    /// `Showing X / Y shows`
    pub fn show_status(&self) -> String {
        format!("Showing {} / {} shows", self.shows.len(), self.total_shows)
    }
}

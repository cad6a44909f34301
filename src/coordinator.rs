//! Fetch coordination
//!
//! Sequences the show load, the default-show pick and every episode load, and
//! decides whether a late episode response may still touch the view.
//!
//! The coordinator never awaits on its own while it holds the session. Each
//! fetch is split in two steps so a caller can run the request elsewhere and
//! hand the result back later:
//!
//! 1. `begin_*` / `select_show` update the phase and say what to fetch
//! 2. `finish_*` applies (or discards) the result
//!
//! The staleness check happens in step 2, against the show that is current
//! *at resolution time*.

use thiserror::Error;

use crate::api::{CatalogError, CatalogSource};
use crate::cache::EpisodeCache;
use crate::models::{Episode, Show, ShowId};
use crate::view::{pick_default_show, ViewState};

/// Show opened on start when the catalog contains it
pub const PREFERRED_SHOW_ID: ShowId = 82;

/// User-facing failures, one message per operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("could not load shows")]
    ShowsUnavailable,

    #[error("could not load episodes")]
    EpisodesUnavailable { show_id: ShowId },

    #[error("no shows found")]
    EmptyCatalog,
}

// =============================================================================
// Session
// =============================================================================

/// Explicit application state shared by the coordinator and the screens
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub view: ViewState,
    pub cache: EpisodeCache,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// Fetch Phase
// =============================================================================

/// Coordinator state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    LoadingShows,
    ShowsReady,
    LoadingEpisodes(ShowId),
    EpisodesReady(ShowId),
    Failed(CoordinatorError),
}

impl FetchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchPhase::LoadingShows | FetchPhase::LoadingEpisodes(_))
    }

    pub fn error(&self) -> Option<&CoordinatorError> {
        match self {
            FetchPhase::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Status text for the current phase, if there is one to show
    pub fn message(&self) -> Option<String> {
        match self {
            FetchPhase::LoadingShows => Some("Loading shows...".to_string()),
            FetchPhase::LoadingEpisodes(_) => Some("Loading episodes...".to_string()),
            FetchPhase::Failed(CoordinatorError::EmptyCatalog) => {
                Some("No shows found.".to_string())
            }
            FetchPhase::Failed(e) => Some(format!("Error: {}.", e)),
            _ => None,
        }
    }
}

/// Episode fetch the caller must run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRequest {
    pub show_id: ShowId,
}

/// Result of selecting a show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Already the current show; nothing happened
    Unchanged,
    /// Episodes came from the cache; no request needed
    Cached,
    /// Cache miss; run this request and pass the result to `finish_load_episodes`
    Fetch(EpisodeRequest),
}

/// What happened to a finished episode fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Applied to the view
    Applied,
    /// The user moved on; the view was left alone
    Stale,
    /// The fetch failed for the current show
    Failed(CoordinatorError),
}

/// A finished fetch travelling back to the coordinator
#[derive(Debug)]
pub enum FetchOutcome {
    Shows(Result<Vec<Show>, CatalogError>),
    Episodes(EpisodeRequest, Result<Vec<Episode>, CatalogError>),
}

/// What to fetch after a call to [`FetchCoordinator::retry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    Shows,
    Episodes(EpisodeRequest),
    /// Episodes were already cached; nothing to fetch
    Cached,
    Nothing,
}

// =============================================================================
// Fetch Coordinator
// =============================================================================

#[derive(Debug, Clone)]
pub struct FetchCoordinator {
    phase: FetchPhase,
    preferred_show: ShowId,
}

impl Default for FetchCoordinator {
    fn default() -> Self {
        Self::new(PREFERRED_SHOW_ID)
    }
}

impl FetchCoordinator {
    pub fn new(preferred_show: ShowId) -> Self {
        Self {
            phase: FetchPhase::Idle,
            preferred_show,
        }
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn preferred_show(&self) -> ShowId {
        self.preferred_show
    }

    fn transition(&mut self, next: FetchPhase) {
        tracing::debug!(from = ?self.phase, to = ?next, "fetch phase");
        self.phase = next;
    }

    // -------------------------------------------------------------------------
    // Shows
    // -------------------------------------------------------------------------

    /// Start loading the show list. Returns false if a load is already running.
    pub fn begin_load_shows(&mut self) -> bool {
        if self.phase == FetchPhase::LoadingShows {
            return false;
        }
        self.transition(FetchPhase::LoadingShows);
        true
    }

    /// Apply the show list and select the default show.
    ///
    /// Returns the episode request for the default show on a cache miss.
    pub fn finish_load_shows(
        &mut self,
        session: &mut Session,
        result: Result<Vec<Show>, CatalogError>,
    ) -> Result<Option<EpisodeRequest>, CoordinatorError> {
        let shows = match result {
            Ok(shows) => shows,
            Err(e) => {
                tracing::warn!(error = %e, "show list fetch failed");
                self.transition(FetchPhase::Failed(CoordinatorError::ShowsUnavailable));
                return Err(CoordinatorError::ShowsUnavailable);
            }
        };

        tracing::info!(count = shows.len(), "shows loaded");
        session.view.set_shows(shows);

        let Some(default_id) = pick_default_show(session.view.shows(), self.preferred_show)
        else {
            self.transition(FetchPhase::Failed(CoordinatorError::EmptyCatalog));
            return Err(CoordinatorError::EmptyCatalog);
        };

        self.transition(FetchPhase::ShowsReady);
        match self.select_show(session, default_id) {
            Selection::Fetch(request) => Ok(Some(request)),
            Selection::Cached => Ok(None),
            // A reload kept the same current show
            Selection::Unchanged if session.cache.contains(default_id) => {
                let cached = session.cache.get(default_id).map(<[Episode]>::to_vec);
                session.view.set_episodes(cached.unwrap_or_default());
                self.transition(FetchPhase::EpisodesReady(default_id));
                Ok(None)
            }
            Selection::Unchanged => {
                self.transition(FetchPhase::LoadingEpisodes(default_id));
                Ok(Some(EpisodeRequest {
                    show_id: default_id,
                }))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Episodes
    // -------------------------------------------------------------------------

    /// Make `show_id` current and load its episodes from cache if possible
    pub fn select_show(&mut self, session: &mut Session, show_id: ShowId) -> Selection {
        if session.view.current_show() == Some(show_id) {
            return Selection::Unchanged;
        }

        session.view.select_show(show_id);

        if let Some(cached) = session.cache.get(show_id) {
            tracing::debug!(show_id, "episode cache hit");
            let episodes = cached.to_vec();
            session.view.set_episodes(episodes);
            self.transition(FetchPhase::EpisodesReady(show_id));
            return Selection::Cached;
        }

        tracing::debug!(show_id, "episode cache miss");
        session.view.clear_episodes();
        self.transition(FetchPhase::LoadingEpisodes(show_id));
        Selection::Fetch(EpisodeRequest { show_id })
    }

    /// Apply a finished episode fetch.
    ///
    /// Successful responses are always cached. They only reach the view when
    /// the request's show is still current and its episodes are not on screen
    /// yet (loading, or failed by an earlier request). Failures for a show the
    /// user has left are dropped. A duplicate response for a show that is
    /// already on screen counts as stale.
    pub fn finish_load_episodes(
        &mut self,
        session: &mut Session,
        request: EpisodeRequest,
        result: Result<Vec<Episode>, CatalogError>,
    ) -> Resolution {
        let awaiting = match &self.phase {
            FetchPhase::LoadingEpisodes(id) => *id == request.show_id,
            // An earlier request for the same show failed; this one may still land
            FetchPhase::Failed(CoordinatorError::EpisodesUnavailable { show_id }) => {
                *show_id == request.show_id
            }
            _ => false,
        };
        let is_current = awaiting && session.view.current_show() == Some(request.show_id);

        match result {
            Ok(episodes) if !is_current => {
                if !session.cache.contains(request.show_id) {
                    session.cache.put(request.show_id, episodes);
                }
                tracing::info!(show_id = request.show_id, "stale episode response cached");
                Resolution::Stale
            }
            Ok(episodes) => {
                if !session.cache.contains(request.show_id) {
                    session.cache.put(request.show_id, episodes.clone());
                }

                tracing::info!(
                    show_id = request.show_id,
                    count = episodes.len(),
                    "episodes loaded"
                );
                session.view.set_episodes(episodes);
                self.transition(FetchPhase::EpisodesReady(request.show_id));
                Resolution::Applied
            }
            Err(e) if !is_current => {
                tracing::debug!(
                    show_id = request.show_id,
                    error = %e,
                    "stale episode failure dropped"
                );
                Resolution::Stale
            }
            Err(e) => {
                tracing::warn!(show_id = request.show_id, error = %e, "episode fetch failed");
                let error = CoordinatorError::EpisodesUnavailable {
                    show_id: request.show_id,
                };
                self.transition(FetchPhase::Failed(error.clone()));
                Resolution::Failed(error)
            }
        }
    }

    /// Route a finished fetch to the matching `finish_*` step.
    ///
    /// Returns a follow-up episode request when the show list completion
    /// selected a default show that is not cached yet.
    pub fn apply(
        &mut self,
        session: &mut Session,
        outcome: FetchOutcome,
    ) -> Result<Option<EpisodeRequest>, CoordinatorError> {
        match outcome {
            FetchOutcome::Shows(result) => self.finish_load_shows(session, result),
            FetchOutcome::Episodes(request, result) => {
                match self.finish_load_episodes(session, request, result) {
                    Resolution::Failed(e) => Err(e),
                    Resolution::Applied | Resolution::Stale => Ok(None),
                }
            }
        }
    }

    /// Re-arm the operation that failed last
    pub fn retry(&mut self, session: &mut Session) -> Retry {
        match self.phase.clone() {
            FetchPhase::Failed(CoordinatorError::ShowsUnavailable)
            | FetchPhase::Failed(CoordinatorError::EmptyCatalog) => {
                if self.begin_load_shows() {
                    Retry::Shows
                } else {
                    Retry::Nothing
                }
            }
            FetchPhase::Failed(CoordinatorError::EpisodesUnavailable { show_id })
                if session.view.current_show() == Some(show_id) =>
            {
                if let Some(cached) = session.cache.get(show_id) {
                    tracing::debug!(show_id, "retry served from cache");
                    let episodes = cached.to_vec();
                    session.view.set_episodes(episodes);
                    self.transition(FetchPhase::EpisodesReady(show_id));
                    return Retry::Cached;
                }
                self.transition(FetchPhase::LoadingEpisodes(show_id));
                Retry::Episodes(EpisodeRequest { show_id })
            }
            _ => Retry::Nothing,
        }
    }

    // -------------------------------------------------------------------------
    // Sequential helpers
    // -------------------------------------------------------------------------

    /// Load the show list and, if needed, the default show's episodes
    pub async fn start<C: CatalogSource>(
        &mut self,
        session: &mut Session,
        client: &C,
    ) -> Result<Option<ShowId>, CoordinatorError> {
        self.begin_load_shows();
        let shows = client.fetch_shows().await;
        if let Some(request) = self.finish_load_shows(session, shows)? {
            let episodes = client.fetch_episodes(request.show_id).await;
            if let Resolution::Failed(e) = self.finish_load_episodes(session, request, episodes) {
                return Err(e);
            }
        }
        Ok(session.view.current_show())
    }

    /// Select a show and load its episodes, fetching only on a cache miss
    pub async fn load_episodes_for_show<C: CatalogSource>(
        &mut self,
        session: &mut Session,
        client: &C,
        show_id: ShowId,
    ) -> Result<Resolution, CoordinatorError> {
        match self.select_show(session, show_id) {
            Selection::Unchanged | Selection::Cached => Ok(Resolution::Applied),
            Selection::Fetch(request) => {
                let episodes = client.fetch_episodes(request.show_id).await;
                match self.finish_load_episodes(session, request, episodes) {
                    Resolution::Failed(e) => Err(e),
                    resolution => Ok(resolution),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: u64, show_id: ShowId) -> Episode {
        Episode {
            id,
            show_id,
            name: format!("Episode {}", id),
            season: 1,
            number: 1,
            summary: None,
            image: None,
        }
    }

    #[test]
    fn test_phase_messages() {
        assert_eq!(FetchPhase::Idle.message(), None);
        assert_eq!(
            FetchPhase::LoadingShows.message().as_deref(),
            Some("Loading shows...")
        );
        assert_eq!(
            FetchPhase::Failed(CoordinatorError::ShowsUnavailable)
                .message()
                .as_deref(),
            Some("Error: could not load shows.")
        );
        assert_eq!(
            FetchPhase::Failed(CoordinatorError::EpisodesUnavailable { show_id: 1 })
                .message()
                .as_deref(),
            Some("Error: could not load episodes.")
        );
        assert!(FetchPhase::LoadingEpisodes(1).is_loading());
    }

    #[test]
    fn test_shows_failure_enters_error() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();
        assert!(coordinator.begin_load_shows());
        assert!(!coordinator.begin_load_shows());

        let result =
            coordinator.finish_load_shows(&mut session, Err(CatalogError::HttpStatus(503)));
        assert_eq!(result, Err(CoordinatorError::ShowsUnavailable));
        assert_eq!(
            coordinator.phase(),
            &FetchPhase::Failed(CoordinatorError::ShowsUnavailable)
        );
    }

    #[test]
    fn test_empty_catalog() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();
        coordinator.begin_load_shows();

        let result = coordinator.finish_load_shows(&mut session, Ok(vec![]));
        assert_eq!(result, Err(CoordinatorError::EmptyCatalog));
        assert_eq!(session.view.current_show(), None);
    }

    #[test]
    fn test_default_show_prefers_configured_id() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();
        coordinator.begin_load_shows();

        let shows = vec![Show::new(1, "Bob's Burgers"), Show::new(82, "Archer")];
        let request = coordinator.finish_load_shows(&mut session, Ok(shows)).unwrap();
        assert_eq!(request, Some(EpisodeRequest { show_id: 82 }));
        assert_eq!(coordinator.phase(), &FetchPhase::LoadingEpisodes(82));
    }

    #[test]
    fn test_default_show_falls_back_to_first_sorted() {
        let mut coordinator = FetchCoordinator::new(999);
        let mut session = Session::new();
        coordinator.begin_load_shows();

        let shows = vec![Show::new(1, "Bob's Burgers"), Show::new(7, "archer")];
        let request = coordinator.finish_load_shows(&mut session, Ok(shows)).unwrap();
        assert_eq!(request, Some(EpisodeRequest { show_id: 7 }));
    }

    #[test]
    fn test_reselect_current_is_noop() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();

        let first = coordinator.select_show(&mut session, 5);
        assert!(matches!(first, Selection::Fetch(_)));
        let phase = coordinator.phase().clone();

        assert_eq!(coordinator.select_show(&mut session, 5), Selection::Unchanged);
        assert_eq!(coordinator.phase(), &phase);
    }

    #[test]
    fn test_cache_hit_resolves_immediately() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();
        session.cache.put(5, vec![episode(1, 5)]);

        assert_eq!(coordinator.select_show(&mut session, 5), Selection::Cached);
        assert_eq!(coordinator.phase(), &FetchPhase::EpisodesReady(5));
        assert_eq!(session.view.episodes().len(), 1);
    }

    #[test]
    fn test_stale_success_is_cached_not_applied() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();

        let Selection::Fetch(request_a) = coordinator.select_show(&mut session, 1) else {
            panic!("expected fetch");
        };
        let Selection::Fetch(request_b) = coordinator.select_show(&mut session, 2) else {
            panic!("expected fetch");
        };

        let stale =
            coordinator.finish_load_episodes(&mut session, request_a, Ok(vec![episode(10, 1)]));
        assert_eq!(stale, Resolution::Stale);
        assert!(session.view.episodes().is_empty());
        assert!(session.cache.contains(1));
        assert_eq!(coordinator.phase(), &FetchPhase::LoadingEpisodes(2));

        let applied =
            coordinator.finish_load_episodes(&mut session, request_b, Ok(vec![episode(20, 2)]));
        assert_eq!(applied, Resolution::Applied);
        assert_eq!(session.view.episodes()[0].id, 20);
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();

        let Selection::Fetch(request_a) = coordinator.select_show(&mut session, 1) else {
            panic!("expected fetch");
        };
        coordinator.select_show(&mut session, 2);

        let resolution = coordinator.finish_load_episodes(
            &mut session,
            request_a,
            Err(CatalogError::HttpStatus(500)),
        );
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(coordinator.phase(), &FetchPhase::LoadingEpisodes(2));
    }

    #[test]
    fn test_duplicate_response_keeps_view() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();

        let Selection::Fetch(request) = coordinator.select_show(&mut session, 4) else {
            panic!("expected fetch");
        };
        coordinator.finish_load_episodes(&mut session, request, Ok(vec![episode(40, 4)]));
        session.view.set_episode_search("ep");

        let again =
            coordinator.finish_load_episodes(&mut session, request, Ok(vec![episode(41, 4)]));
        assert_eq!(again, Resolution::Stale);
        assert_eq!(session.view.episode_search(), "ep");
        assert_eq!(session.view.episodes()[0].id, 40);
    }

    #[test]
    fn test_current_failure_enters_error_and_retries() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();

        let Selection::Fetch(request) = coordinator.select_show(&mut session, 3) else {
            panic!("expected fetch");
        };
        let resolution = coordinator.finish_load_episodes(
            &mut session,
            request,
            Err(CatalogError::Format("bad".into())),
        );
        assert_eq!(
            resolution,
            Resolution::Failed(CoordinatorError::EpisodesUnavailable { show_id: 3 })
        );
        assert!(!session.cache.contains(3));

        assert_eq!(
            coordinator.retry(&mut session),
            Retry::Episodes(EpisodeRequest { show_id: 3 })
        );
        assert_eq!(coordinator.phase(), &FetchPhase::LoadingEpisodes(3));
    }

    #[test]
    fn test_retry_without_failure_does_nothing() {
        let mut coordinator = FetchCoordinator::default();
        let mut session = Session::new();
        assert_eq!(coordinator.retry(&mut session), Retry::Nothing);
    }
}

//! showbrowse - terminal browser for the TVMaze catalog
//!
//! Loads the show list, opens a default show, and lets you filter episodes
//! or jump to a single one. Episode lists are cached per show for the
//! session, and late responses for a show you already left never overwrite
//! what is on screen.
//!
//! # Modules
//!
//! - `models` - Show, Episode, jump target
//! - `api` - TVMaze client and the catalog trait
//! - `cache` - per-show episode cache
//! - `view` - search terms, jump target and the visible subsets
//! - `coordinator` - fetch state machine and staleness checks
//! - `app` - TUI state and key handling
//! - `ui` - ratatui rendering
//! - `cli` / `commands` - scriptable mode

pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod logging;
pub mod models;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use api::{CatalogError, CatalogSource, TvMazeClient};
pub use app::{App, Effect, Screen};
pub use cache::EpisodeCache;
pub use config::Config;
pub use coordinator::{
    CoordinatorError, EpisodeRequest, FetchCoordinator, FetchOutcome, FetchPhase, Resolution,
    Selection, Session,
};
pub use models::{Episode, EpisodeId, JumpTarget, Show, ShowId};
pub use view::{ViewError, ViewState, VisibleView};

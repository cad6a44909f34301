//! Remote catalog access
//!
//! - TVMaze: show list and per-show episode lists
//!
//! The coordinator only sees the [`CatalogSource`] trait, so tests can swap
//! the HTTP client for an in-memory source.

pub mod tvmaze;

use std::future::Future;

use crate::models::{Episode, Show, ShowId};

pub use tvmaze::{CatalogError, TvMazeClient};

/// Read-only catalog queries.
///
/// Each call is a single request: no retry and no caching at this layer.
pub trait CatalogSource {
    /// List every show in the catalog, in API order
    fn fetch_shows(&self) -> impl Future<Output = Result<Vec<Show>, CatalogError>> + Send;

    /// List the episodes of one show, in API order
    fn fetch_episodes(
        &self,
        show_id: ShowId,
    ) -> impl Future<Output = Result<Vec<Episode>, CatalogError>> + Send;
}

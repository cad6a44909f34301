//! Integration tests for showbrowse
//!
//! Tests are organized by component:
//! - tvmaze_test: TVMaze client parsing and error taxonomy (mock server)
//! - view_test: filtering, sorting and jump targets
//! - coordinator_test: fetch state machine, cache and stale responses
//! - cli_test: argument parsing, exit codes, JSON shapes
//! - ui_test: rendered screens on a test backend
//! - e2e_test: start-up, browse and CLI flows against a mock catalog

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs

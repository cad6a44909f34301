//! CLI - Command Line Interface for showbrowse
//!
//! Every browse action the TUI offers is scriptable. Output is JSON when
//! asked for or when stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # List shows matching a term
//! showbrowse shows --search drama --limit 10
//!
//! # Episodes of a show, filtered or jumped to one episode
//! showbrowse episodes 82 --search pilot
//! showbrowse episodes 82 --episode 4952
//! showbrowse episodes 82 --episode all
//!
//! # What the TUI opens on start
//! showbrowse default --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::CatalogError;
use crate::coordinator::CoordinatorError;
use crate::models::{Episode, JumpTarget, Show, ShowId};
use crate::view::ViewError;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Catalog unreachable or returned an error status
    NetworkError = 3,
    /// Show or episode not found
    NotFound = 4,
    /// The catalog has no shows
    EmptyCatalog = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&CatalogError> for ExitCode {
    fn from(e: &CatalogError) -> Self {
        match e {
            CatalogError::Transport(_) | CatalogError::HttpStatus(_) => ExitCode::NetworkError,
            CatalogError::Format(_) => ExitCode::Error,
        }
    }
}

impl From<&CoordinatorError> for ExitCode {
    fn from(e: &CoordinatorError) -> Self {
        match e {
            CoordinatorError::ShowsUnavailable | CoordinatorError::EpisodesUnavailable { .. } => {
                ExitCode::NetworkError
            }
            CoordinatorError::EmptyCatalog => ExitCode::EmptyCatalog,
        }
    }
}

impl From<&ViewError> for ExitCode {
    fn from(e: &ViewError) -> Self {
        match e {
            ViewError::EpisodeNotFound(_) => ExitCode::NotFound,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// showbrowse - browse the TVMaze show catalog
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "showbrowse",
    version,
    about = "Browse TV shows and episodes from TVMaze",
    long_about = "A terminal browser for the TVMaze catalog: search shows, \
                  open a show's episodes, filter them or jump to one.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  showbrowse                             Launch interactive TUI\n\
                  showbrowse shows --search comedy       Search shows\n\
                  showbrowse episodes 82 --search pilot  Filter episodes\n\
                  showbrowse default --json              Show the start-up selection"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List shows sorted by name
    #[command(visible_alias = "s")]
    Shows(ShowsCmd),

    /// List the episodes of a show
    #[command(visible_alias = "e")]
    Episodes(EpisodesCmd),

    /// Load the catalog and open the default show, like the TUI does on start
    #[command(visible_alias = "d")]
    Default(DefaultCmd),
}

/// List shows, optionally filtered
#[derive(Args, Debug)]
pub struct ShowsCmd {
    /// Case-insensitive filter over name, summary and genres
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum number of shows to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// List a show's episodes, filtered or narrowed to one episode
#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// TVMaze show id (defaults to the configured default show)
    pub show_id: Option<ShowId>,

    /// Case-insensitive filter over episode name and summary
    #[arg(long, short = 's', conflicts_with = "episode")]
    pub search: Option<String>,

    /// Show only this episode, or `all`
    #[arg(long, short = 'e', value_parser = parse_jump_target)]
    pub episode: Option<JumpTarget>,
}

fn parse_jump_target(value: &str) -> Result<JumpTarget, String> {
    JumpTarget::parse(value)
        .ok_or_else(|| format!("expected `all` or an episode id, got `{}`", value))
}

#[derive(Args, Debug)]
pub struct DefaultCmd {}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// `shows` response
#[derive(Debug, Serialize)]
pub struct ShowList<'a> {
    pub shows: Vec<&'a Show>,
    pub total: usize,
    pub status: String,
}

/// `episodes` response
#[derive(Debug, Serialize)]
pub struct EpisodeList<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<&'a Show>,
    pub show_id: ShowId,
    pub episodes: Vec<&'a Episode>,
    pub total: usize,
    pub status: String,
}

/// `default` response
#[derive(Debug, Serialize)]
pub struct DefaultSelection<'a> {
    pub show: Option<&'a Show>,
    pub show_id: ShowId,
    pub episode_count: usize,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print a plain text line (human mode)
    pub fn line(&self, text: impl std::fmt::Display) {
        println!("{}", text);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

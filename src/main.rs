//! showbrowse - terminal browser for the TVMaze catalog
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! showbrowse
//!
//! # CLI mode (for automation)
//! showbrowse shows --search comedy
//! showbrowse episodes 82 --search pilot --json
//! showbrowse default
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use showbrowse::api::TvMazeClient;
use showbrowse::app::{App, Effect};
use showbrowse::cli::{Cli, Command, ExitCode, Output};
use showbrowse::config::Config;
use showbrowse::coordinator::FetchOutcome;
use showbrowse::{commands, logging, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref());

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        if cli.verbose {
            logging::init_stderr(config.log_level.as_deref());
        }
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Shows(cmd)) => commands::shows_cmd(cmd, config, &output).await,

        Some(Command::Episodes(cmd)) => commands::episodes_cmd(cmd, config, &output).await,

        Some(Command::Default(cmd)) => commands::default_cmd(cmd, config, &output).await,

        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config) -> Result<()> {
    let _log_guard = logging::init_file(&Config::log_dir(), config.log_level.as_deref());
    tracing::info!(base_url = %config.api_base_url, "starting tui");

    let client = TvMazeClient::with_base_url(config.api_base_url.as_str());
    let mut app = App::with_options(config.default_show_id, config.open_default_show);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut terminal = init_terminal()?;

    if let Some(effect) = app.start() {
        spawn_fetch(&client, effect, tx.clone());
    }

    let result = run_event_loop(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Run one fetch on the runtime; the outcome comes back through `tx`
fn spawn_fetch(client: &TvMazeClient, effect: Effect, tx: UnboundedSender<FetchOutcome>) {
    let client = client.clone();
    tokio::spawn(async move {
        let outcome = match effect {
            Effect::LoadShows => FetchOutcome::Shows(client.shows().await),
            Effect::LoadEpisodes(request) => {
                FetchOutcome::Episodes(request, client.episodes(request.show_id).await)
            }
        };
        // The receiver is gone once the app has quit
        let _ = tx.send(outcome);
    });
}

/// Main event loop - handles input, applies finished fetches, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &TvMazeClient,
    tx: &UnboundedSender<FetchOutcome>,
    rx: &mut UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so finished fetches are picked up
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(effect) = app.handle_key(key) {
                        spawn_fetch(client, effect, tx.clone());
                    }
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            if let Some(effect) = app.apply_outcome(outcome) {
                spawn_fetch(client, effect, tx.clone());
            }
        }
    }

    tracing::info!("tui closed");
    Ok(())
}

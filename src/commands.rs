//! CLI Command Handlers
//!
//! Each handler drives the same coordinator and view state the TUI uses,
//! then prints the visible result. Handlers take CLI args, the resolved
//! config and Output, and return an ExitCode.

use crate::api::{CatalogSource, TvMazeClient};
use crate::cli::{
    DefaultCmd, DefaultSelection, EpisodeList, EpisodesCmd, ExitCode, Output, ShowList, ShowsCmd,
};
use crate::config::Config;
use crate::coordinator::{FetchCoordinator, Session};

fn client_for(config: &Config) -> TvMazeClient {
    TvMazeClient::with_base_url(config.api_base_url.as_str())
}

// =============================================================================
// Shows Command
// =============================================================================

pub async fn shows_cmd(cmd: ShowsCmd, config: &Config, output: &Output) -> ExitCode {
    let client = client_for(config);
    let mut coordinator = FetchCoordinator::new(config.default_show_id);
    let mut session = Session::new();

    output.info("Loading shows...");

    // A listing has no use for the default show's episode request
    coordinator.begin_load_shows();
    let shows = client.fetch_shows().await;
    if let Err(e) = coordinator.finish_load_shows(&mut session, shows) {
        return output.error(e.to_string(), ExitCode::from(&e));
    }

    if let Some(term) = cmd.search {
        session.view.set_show_search(term);
    }

    let view = session.view.visible();
    let status = view.show_status();
    let mut shows = view.shows;
    if let Some(limit) = cmd.limit {
        shows.truncate(limit);
    }

    if output.json {
        let list = ShowList {
            shows,
            total: view.total_shows,
            status,
        };
        if let Err(e) = output.print(list) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for show in shows {
            output.line(format!("{:>7}  {}", show.id, show));
        }
        output.info(status);
    }
    ExitCode::Success
}

// =============================================================================
// Episodes Command
// =============================================================================

pub async fn episodes_cmd(cmd: EpisodesCmd, config: &Config, output: &Output) -> ExitCode {
    let client = client_for(config);
    let mut coordinator = FetchCoordinator::new(config.default_show_id);
    let mut session = Session::new();
    let show_id = cmd.show_id.unwrap_or(config.default_show_id);

    output.info(format!("Loading episodes for show {}...", show_id));

    if let Err(e) = coordinator
        .load_episodes_for_show(&mut session, &client, show_id)
        .await
    {
        return output.error(e.to_string(), ExitCode::from(&e));
    }

    if let Some(target) = cmd.episode {
        if let Err(e) = session.view.select_episode(target) {
            return output.error(e.to_string(), ExitCode::from(&e));
        }
    } else if let Some(term) = cmd.search {
        session.view.set_episode_search(term);
    }

    let view = session.view.visible();
    let status = view.episode_status();

    if output.json {
        let list = EpisodeList {
            show: view.current_show,
            show_id,
            episodes: view.episodes,
            total: view.total_episodes,
            status,
        };
        if let Err(e) = output.print(list) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for episode in view.episodes {
            output.line(episode);
        }
        output.info(status);
    }
    ExitCode::Success
}

// =============================================================================
// Default Command
// =============================================================================

pub async fn default_cmd(_cmd: DefaultCmd, config: &Config, output: &Output) -> ExitCode {
    let client = client_for(config);
    let mut coordinator = FetchCoordinator::new(config.default_show_id);
    let mut session = Session::new();

    output.info("Loading shows...");

    let show_id = match coordinator.start(&mut session, &client).await {
        Ok(Some(id)) => id,
        Ok(None) => return output.error("no shows found", ExitCode::EmptyCatalog),
        Err(e) => return output.error(e.to_string(), ExitCode::from(&e)),
    };

    let show = session.view.current_show_record();
    let episode_count = session.view.episodes().len();

    if output.json {
        let selection = DefaultSelection {
            show,
            show_id,
            episode_count,
        };
        if let Err(e) = output.print(selection) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        let name = show.map(|s| s.name.as_str()).unwrap_or("unknown");
        output.line(format!(
            "{} (#{}): {} episodes",
            name, show_id, episode_count
        ));
    }
    ExitCode::Success
}

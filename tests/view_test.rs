//! View state tests
//!
//! Filtering, sorting and jump-target behaviour over realistic catalogs.

use showbrowse::models::{episode_code, Episode, JumpTarget, Show};
use showbrowse::view::{pick_default_show, sort_shows_by_name, ViewError, ViewState};

// =============================================================================
// Fixtures
// =============================================================================

fn show(id: u64, name: &str, summary: Option<&str>, genres: &[&str]) -> Show {
    let mut show = Show::new(id, name);
    show.summary = summary.map(str::to_string);
    show.genres = genres.iter().map(|g| g.to_string()).collect();
    show
}

fn catalog() -> Vec<Show> {
    vec![
        show(169, "Breaking Bad", Some("<p>A high school <b>chemistry</b> tutor turns to crime.</p>"), &["Drama", "Crime"]),
        show(82, "Game of Thrones", Some("<p>Noble families fight for the Iron Throne.</p>"), &["Drama", "Fantasy"]),
        show(1, "Under the Dome", None, &["Science-Fiction", "Thriller"]),
        show(5, "archer", Some("<p>Spy comedy.</p>"), &["Comedy"]),
        show(6, "Archer", None, &["Comedy", "Action"]),
    ]
}

fn episode(id: u64, season: u32, number: u32, name: &str, summary: Option<&str>) -> Episode {
    Episode {
        id,
        show_id: 82,
        name: name.to_string(),
        season,
        number,
        summary: summary.map(str::to_string),
        image: None,
    }
}

fn season_one() -> Vec<Episode> {
    vec![
        episode(4952, 1, 1, "Winter is Coming", Some("<p>Lord Eddard Stark is summoned to court.</p>")),
        episode(4953, 1, 2, "The Kingsroad", Some("<p>The Lannisters plot.</p>")),
        episode(4954, 1, 3, "Lord Snow", None),
    ]
}

// =============================================================================
// Shows
// =============================================================================

#[test]
fn test_empty_filter_returns_full_sorted_list() {
    let mut view = ViewState::new();
    view.set_shows(catalog());

    let all: Vec<u64> = view.filter_shows_by("").iter().map(|s| s.id).collect();
    let sorted: Vec<u64> = view.shows().iter().map(|s| s.id).collect();
    assert_eq!(all, sorted);
    assert_eq!(all.len(), 5);
}

#[test]
fn test_show_filter_is_exact_subset() {
    let mut view = ViewState::new();
    view.set_shows(catalog());

    for term in ["drama", "COMEDY", "throne", "chemistry", "thriller", "nothing-matches"] {
        let needle = term.to_lowercase();
        let matched: Vec<u64> = view.filter_shows_by(term).iter().map(|s| s.id).collect();

        for show in view.shows() {
            let text = format!(
                "{} {} {}",
                show.name,
                show.summary_text().unwrap_or_default(),
                show.genre_line()
            )
            .to_lowercase();
            assert_eq!(
                matched.contains(&show.id),
                text.contains(&needle),
                "term {:?} vs show {:?}",
                term,
                show.name
            );
        }
    }
}

#[test]
fn test_show_filter_keeps_sorted_order() {
    let mut view = ViewState::new();
    view.set_shows(catalog());
    let names: Vec<&str> = view
        .filter_shows_by("drama")
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["Breaking Bad", "Game of Thrones"]);
}

#[test]
fn test_sort_equal_names_keep_input_order() {
    let mut shows = catalog();
    sort_shows_by_name(&mut shows);
    let names: Vec<&str> = shows.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["archer", "Archer", "Breaking Bad", "Game of Thrones", "Under the Dome"]
    );

    let once: Vec<u64> = shows.iter().map(|s| s.id).collect();
    sort_shows_by_name(&mut shows);
    let twice: Vec<u64> = shows.iter().map(|s| s.id).collect();
    assert_eq!(once, twice);
}

#[test]
fn test_archer_scenario_default_pick() {
    let mut view = ViewState::new();
    view.set_shows(vec![Show::new(1, "Bob's Burgers"), Show::new(82, "Archer")]);

    let names: Vec<&str> = view.shows().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Archer", "Bob's Burgers"]);
    assert_eq!(pick_default_show(view.shows(), 82), Some(82));
}

// =============================================================================
// Episodes
// =============================================================================

#[test]
fn test_pilot_scenario() {
    let mut view = ViewState::new();
    view.set_episodes(vec![episode(1, 1, 1, "Pilot", None)]);

    assert_eq!(view.filter_episodes_by("pilot").len(), 1);
    assert_eq!(view.filter_episodes_by("xyz").len(), 0);
    assert_eq!(view.filter_episodes_by("").len(), 1);
}

#[test]
fn test_episode_filter_matches_summary_text_in_order() {
    let mut view = ViewState::new();
    view.set_episodes(season_one());

    let ids: Vec<u64> = view.filter_episodes_by("lord").iter().map(|e| e.id).collect();
    // Name match and summary match, in fetched order
    assert_eq!(ids, vec![4952, 4954]);

    // Markup is not searchable text
    assert!(view.filter_episodes_by("<p>").is_empty());
}

#[test]
fn test_select_episode_all_and_single() {
    let mut view = ViewState::new();
    view.set_episodes(season_one());

    let all = view.select_episode(JumpTarget::All).unwrap();
    assert_eq!(all.len(), 3);

    let one = view.select_episode(JumpTarget::Episode(4953)).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].name, "The Kingsroad");

    let err = view.select_episode(JumpTarget::Episode(1)).unwrap_err();
    assert_eq!(err, ViewError::EpisodeNotFound(1));
    // The failed jump left the previous one in place
    assert_eq!(view.jump_target(), JumpTarget::Episode(4953));
}

#[test]
fn test_all_after_search_shows_full_list() {
    let mut view = ViewState::new();
    view.set_episodes(season_one());
    view.set_episode_search("kingsroad");
    assert_eq!(view.visible_episodes().len(), 1);

    let all = view.select_episode(JumpTarget::All).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(view.episode_search(), "");
}

#[test]
fn test_visible_view_description() {
    let mut view = ViewState::new();
    view.set_shows(catalog());
    view.select_show(82);
    view.set_episodes(season_one());
    view.set_episode_search("lord");

    let visible = view.visible();
    assert_eq!(visible.current_show.map(|s| s.name.as_str()), Some("Game of Thrones"));
    assert_eq!(visible.total_episodes, 3);
    assert_eq!(visible.episode_status(), "Showing 2 / 3 episodes");
    assert_eq!(visible.jump, JumpTarget::All);

    let json = serde_json::to_value(&visible).unwrap();
    assert_eq!(json["total_episodes"], 3);
    assert_eq!(json["jump"], "all");
}

#[test]
fn test_episode_codes() {
    assert_eq!(episode_code(1, 2), "S01E02");
    assert_eq!(episode_code(12, 3), "S12E03");
    assert_eq!(episode_code(1, 23), "S01E23");
}

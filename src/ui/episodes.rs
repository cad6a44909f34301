//! Episode screen
//!
//! Episode rows for the current show beside a card for the highlighted
//! episode. The line above the rows names the active jump target.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{panel, phase_message, render_message, window_start, Theme};
use crate::app::{App, InputMode};
use crate::models::{Episode, JumpTarget};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.session.view;
    let visible = view.visible_episodes();
    let show_name = view
        .current_show_record()
        .map(|s| s.name.as_str())
        .unwrap_or("No show selected");

    let block = panel(
        format!(
            " {} ({}/{}) ",
            show_name,
            visible.len(),
            view.episodes().len()
        ),
        app.input_mode == InputMode::Normal,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.episode_controls_enabled() {
        let (text, style) = phase_message(app.phase())
            .unwrap_or_else(|| ("Select a show to see its episodes".to_string(), Theme::dimmed()));
        render_message(frame, inner, text, style);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(jump_line(app)), rows[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    if visible.is_empty() {
        let text = if view.episodes().is_empty() {
            "This show has no episodes"
        } else {
            "No episodes match your search"
        };
        render_message(frame, chunks[0], text.to_string(), Theme::dimmed());
        return;
    }

    let height = chunks[0].height as usize;
    let start = window_start(&app.episode_list, height);
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, episode)| episode_row(episode, i == app.episode_list.selected))
        .collect();
    frame.render_widget(List::new(items).style(Theme::text()), chunks[0]);

    if let Some(episode) = visible.get(app.episode_list.selected) {
        render_card(frame, chunks[1], episode);
    }
}

/// `Jump: Show all episodes` or `Jump: S01E02 - Name`
fn jump_line(app: &App) -> Line<'static> {
    let view = &app.session.view;
    let label = match view.jump_target() {
        JumpTarget::All => JumpTarget::All.to_string(),
        JumpTarget::Episode(id) => view
            .episodes()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.to_string())
            .unwrap_or_else(|| format!("episode {}", id)),
    };

    Line::from(vec![
        Span::styled("Jump: ", Theme::dimmed()),
        Span::styled(label, Theme::accent()),
    ])
}

fn episode_row(episode: &Episode, is_selected: bool) -> ListItem<'static> {
    let line = Line::from(vec![
        Span::styled(
            if is_selected { "▸ " } else { "  " },
            Theme::accent(),
        ),
        Span::styled(episode.code(), Theme::episode_code()),
        Span::raw(" "),
        Span::styled(
            episode.name.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
    ]);
    ListItem::new(line)
}

/// Card: `Name - S01E01`, `Season 1 Episode 1`, then the summary
fn render_card(frame: &mut Frame, area: Rect, episode: &Episode) {
    let block = panel(format!(" {} ", episode.title()), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let summary_style = if episode.summary_text().is_some() {
        Theme::text()
    } else {
        Theme::dimmed()
    };

    let mut lines = vec![
        Line::from(Span::styled(episode.info_line(), Theme::secondary())),
        Line::from(""),
        Line::from(Span::styled(episode.summary_or_placeholder(), summary_style)),
    ];
    if let Some(image) = &episode.image {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("🖼 {}", image), Theme::dimmed())));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::{EpisodeRequest, FetchOutcome};
    use crate::models::Show;

    #[test]
    fn test_jump_line_names_the_episode() {
        let mut app = App::new();
        app.start();
        app.apply_outcome(FetchOutcome::Shows(Ok(vec![Show::new(82, "Archer")])));
        app.apply_outcome(FetchOutcome::Episodes(
            EpisodeRequest { show_id: 82 },
            Ok(vec![Episode {
                id: 7,
                show_id: 82,
                name: "Mole Hunt".to_string(),
                season: 1,
                number: 1,
                summary: None,
                image: None,
            }]),
        ));

        let text: String = jump_line(&app).spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Jump: Show all episodes");

        app.jump_to(JumpTarget::Episode(7));
        let text: String = jump_line(&app).spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Jump: S01E01 - Mole Hunt");
    }
}

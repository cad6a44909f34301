//! Show browser screen
//!
//! Sorted show list on the left, the highlighted show's details on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{panel, phase_message, render_message, window_start, Theme};
use crate::app::{App, InputMode};
use crate::coordinator::FetchPhase;
use crate::models::Show;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let visible = app.session.view.visible_shows();
    render_list(frame, chunks[0], app, &visible);

    let highlighted = visible.get(app.show_list.selected).copied();
    render_info(frame, chunks[1], highlighted);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, visible: &[&Show]) {
    let total = app.session.view.shows().len();
    let block = panel(
        format!(" SHOWS ({}/{}) ", visible.len(), total),
        app.input_mode == InputMode::Normal,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Only the show-list phases replace the list
    match app.phase() {
        FetchPhase::LoadingShows | FetchPhase::Failed(_) if total == 0 => {
            if let Some((text, style)) = phase_message(app.phase()) {
                render_message(frame, inner, text, style);
            }
            return;
        }
        _ => {}
    }

    if visible.is_empty() {
        let text = if total == 0 {
            "No shows loaded"
        } else {
            "No shows match your search"
        };
        render_message(frame, inner, text.to_string(), Theme::dimmed());
        return;
    }

    let height = inner.height as usize;
    let start = window_start(&app.show_list, height);
    let current = app.session.view.current_show();

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(i, show)| {
            let is_selected = i == app.show_list.selected;
            show_row(show, is_selected, Some(show.id) == current)
        })
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), inner);
}

/// Format: ▸ Name  Genre, Genre  ★ 8.8   (● marks the current show)
fn show_row(show: &Show, is_selected: bool, is_current: bool) -> ListItem<'static> {
    let marker = match (is_selected, is_current) {
        (true, _) => "▸ ",
        (false, true) => "● ",
        (false, false) => "  ",
    };

    let mut spans = vec![
        Span::styled(
            marker,
            if is_selected {
                Theme::accent()
            } else {
                Theme::secondary()
            },
        ),
        Span::styled(
            show.name.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
    ];

    if !show.genres.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(show.genre_line(), Theme::genre()));
    }
    if let Some(rating) = show.rating {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("★ {:.1}", rating), Theme::rating(rating)));
    }

    ListItem::new(Line::from(spans))
}

fn render_info(frame: &mut Frame, area: Rect, show: Option<&Show>) {
    let block = panel(" INFO ".to_string(), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(show) = show else {
        return;
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(show.name.clone(), Theme::title()),
    ])];

    let mut meta = Vec::new();
    if let Some(status) = &show.status {
        meta.push(Span::styled(status.clone(), Theme::secondary()));
    }
    if let Some(runtime) = show.runtime {
        meta.push(Span::styled(format!("  {} min", runtime), Theme::dimmed()));
    }
    if let Some(rating) = show.rating {
        meta.push(Span::styled(format!("  ★ {:.1}", rating), Theme::rating(rating)));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }
    if !show.genres.is_empty() {
        lines.push(Line::from(Span::styled(show.genre_line(), Theme::genre())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        show.summary_text().unwrap_or_default(),
        Theme::text(),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

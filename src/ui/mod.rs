//! Terminal UI components
//!
//! Built with ratatui in a neon palette. Rendering only reads the [`App`];
//! every visible list is derived from the view state on each frame.

pub mod episodes;
pub mod shows;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, ListState, Screen, SearchInput};
use crate::coordinator::FetchPhase;

/// Attribution shown in the status bar
pub const CREDIT: &str = "Data from TVMaze";

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match app.screen {
        Screen::Shows => shows::render(frame, chunks[1], app),
        Screen::Episodes => episodes::render(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// First row to draw so the selected row stays inside `height` rows
pub(crate) fn window_start(list: &ListState, height: usize) -> usize {
    let mut list = list.clone();
    list.scroll_into_view(height);
    list.offset
}

/// Bordered panel used by both screens
pub(crate) fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()))
}

/// Centered one-line message inside `area`
pub(crate) fn render_message(frame: &mut Frame, area: Rect, text: String, style: Style) {
    let para = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Text for the phase, styled as loading or error
pub(crate) fn phase_message(phase: &FetchPhase) -> Option<(String, Style)> {
    let message = phase.message()?;
    let style = if phase.is_loading() {
        Theme::loading()
    } else {
        Theme::error()
    };
    Some((message, style))
}

/// Render the header with title and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "SHOW",
            Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "BROWSE",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::BORDER)),
    );
    frame.render_widget(logo, header_chunks[0]);

    let (input, title, placeholder) = match app.screen {
        Screen::Shows => (&app.show_search, " SEARCH SHOWS ", "Type / to search shows..."),
        Screen::Episodes => (
            &app.episode_search,
            " SEARCH EPISODES ",
            "Type / to search episodes...",
        ),
    };
    let editing = app.input_mode == InputMode::Editing;

    let search_box = Paragraph::new(search_text(input, editing, placeholder))
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(title, Theme::title())),
        );
    frame.render_widget(search_box, header_chunks[1]);
}

fn search_text(input: &SearchInput, editing: bool, placeholder: &str) -> String {
    if editing {
        let (before, after) = input.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if input.query.is_empty() {
        format!("⌕ {}", placeholder)
    } else {
        format!("⌕ {}", input.query)
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(CREDIT.len() as u16 + 2),
        ])
        .split(area);

    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let screen_indicator = Span::styled(
        match app.screen {
            Screen::Shows => " SHOWS ",
            Screen::Episodes => " EPISODES ",
        },
        Style::default().fg(Theme::DIM),
    );

    let status_style = match app.phase() {
        phase if phase.is_loading() => Theme::loading(),
        FetchPhase::Failed(_) => Theme::error(),
        _ => Theme::status_bar(),
    };
    let status = Span::styled(format!(" {} ", app.status_line()), status_style);

    let mut spans = vec![mode_indicator, screen_indicator, status, Span::raw("│")];
    for (key, desc) in help_keys(app) {
        spans.push(Span::styled(format!(" {}", key), Theme::keybind()));
        spans.push(Span::styled(format!(":{}", desc), Theme::keybind_desc()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Theme::status_bar()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(CREDIT)
            .style(Theme::status_bar().fg(Theme::DIM))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn help_keys(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.input_mode == InputMode::Editing {
        return vec![("ESC", "done")];
    }

    let mut keys = vec![("q", "quit"), ("/", "search")];
    match app.screen {
        Screen::Shows => keys.push(("⏎", "open")),
        Screen::Episodes => {
            keys.push(("⏎", "jump"));
            keys.push(("a", "all"));
            keys.push(("ESC", "shows"));
        }
    }
    if matches!(app.phase(), FetchPhase::Failed(_)) {
        keys.push(("r", "retry"));
    }
    keys
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start_follows_selection() {
        let mut list = ListState::new(30);
        assert_eq!(window_start(&list, 10), 0);

        list.selected = 15;
        assert_eq!(window_start(&list, 10), 6);

        list.selected = 3;
        list.offset = 5;
        assert_eq!(window_start(&list, 10), 3);
    }

    #[test]
    fn test_search_text() {
        let mut input = SearchInput::default();
        assert_eq!(search_text(&input, false, "Type /"), "⌕ Type /");

        input.set("pilot");
        assert_eq!(search_text(&input, false, "Type /"), "⌕ pilot");
        input.cursor_left();
        assert_eq!(search_text(&input, true, "Type /"), "⌕ pilo│t");
    }
}
